//! Data types that are stored in, or read from, the ambassador store database.
//!
//! Prices and revenue shares are always [`Cents`]. Order line items carry *snapshots* of the product title and price
//! taken at purchase time, so later catalog edits never change historical orders.
use std::fmt::Display;

use amb_common::Cents;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

//--------------------------------------        User          ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_ambassador: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The name used as the key on the ambassador leaderboard.
    pub fn name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_ambassador: bool,
}

impl NewUser {
    pub fn ambassador(first_name: &str, last_name: &str, email: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            is_ambassador: true,
        }
    }
}

//--------------------------------------    ReferralLink      ---------------------------------------------------------
/// A referral code and the ambassador who owns it.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ReferralLink {
    pub id: i64,
    pub code: String,
    /// The id of the ambassador that owns this link
    pub user_id: i64,
    pub owner_email: String,
}

//--------------------------------------       Product        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image: String,
    pub price: Cents,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub image: String,
    pub price: Cents,
}

impl NewProduct {
    pub fn new(title: &str, price: Cents) -> Self {
        Self { title: title.to_string(), description: String::default(), image: String::default(), price }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_image(mut self, image: &str) -> Self {
        self.image = image.to_string();
        self
    }
}

//--------------------------------------       Customer       ---------------------------------------------------------
/// The buyer's contact and shipping details, as captured on the order.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub zip: String,
}

//--------------------------------------      NewOrder        ---------------------------------------------------------
/// An assembled, not-yet-persisted order aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub ambassador_id: i64,
    pub code: String,
    pub ambassador_email: String,
    pub customer: Customer,
    pub items: Vec<NewOrderItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub product_title: String,
    pub unit_price: Cents,
    pub quantity: i64,
    pub platform_revenue: Cents,
    pub ambassador_revenue: Cents,
}

impl NewOrderItem {
    pub fn line_total(&self) -> Cents {
        self.platform_revenue + self.ambassador_revenue
    }
}

//--------------------------------------        Order         ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// The order has been stored but has no payment session yet. Never visible outside the creating transaction.
    Created,
    /// A payment session is attached and the order is waiting for the payment confirmation.
    AwaitingPayment,
    /// Payment has been confirmed and the order has been settled. Terminal.
    Completed,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Created => write!(f, "Created"),
            OrderStatus::AwaitingPayment => write!(f, "AwaitingPayment"),
            OrderStatus::Completed => write!(f, "Completed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub ambassador_id: i64,
    pub code: String,
    pub ambassador_email: String,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub customer: Customer,
    pub payment_reference: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Populated by a second query after the order header has been loaded.
    #[sqlx(skip)]
    #[serde(rename = "order_items", default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// The customer's full name
    pub fn display_name(&self) -> String {
        full_name(&self.customer.first_name, &self.customer.last_name)
    }

    /// The sum of `unit_price * quantity` over all line items.
    pub fn total(&self) -> Cents {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    pub fn ambassador_revenue(&self) -> Cents {
        self.items.iter().map(|i| i.ambassador_revenue).sum()
    }

    pub fn platform_revenue(&self) -> Cents {
        self.items.iter().map(|i| i.platform_revenue).sum()
    }

    pub fn status(&self) -> OrderStatus {
        match (self.completed, &self.payment_reference) {
            (true, _) => OrderStatus::Completed,
            (false, Some(_)) => OrderStatus::AwaitingPayment,
            (false, None) => OrderStatus::Created,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_title: String,
    pub unit_price: Cents,
    pub quantity: i64,
    pub platform_revenue: Cents,
    pub ambassador_revenue: Cents,
}

impl OrderItem {
    pub fn line_total(&self) -> Cents {
        Cents::from(self.unit_price.value().saturating_mul(self.quantity))
    }
}

/// The outcome of a payment confirmation against the order store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionResult {
    /// This call moved the order into the `Completed` state. Settlement side effects must run exactly once, for this
    /// result only.
    Completed(Order),
    /// The order had already been completed by an earlier (or concurrent) confirmation.
    AlreadyCompleted(Order),
}

impl CompletionResult {
    pub fn order(&self) -> &Order {
        match self {
            CompletionResult::Completed(o) | CompletionResult::AlreadyCompleted(o) => o,
        }
    }

    pub fn is_first_completion(&self) -> bool {
        matches!(self, CompletionResult::Completed(_))
    }
}

//--------------------------------------     RankingEntry     ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct RankingEntry {
    pub name: String,
    pub score: Cents,
}

fn full_name(first: &str, last: &str) -> String {
    format!("{} {}", first.trim(), last.trim()).trim().to_string()
}
