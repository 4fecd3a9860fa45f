use std::fmt::Display;

use amb_common::Cents;
use ambassador_engine::db_types::Order;
use serde::{Deserialize, Serialize};

/// An order as presented by `GET /api/orders`: the stored order plus the customer's name and the order total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    #[serde(flatten)]
    pub order: Order,
    pub name: String,
    pub total: Cents,
}

impl From<Order> for OrderSummary {
    fn from(order: Order) -> Self {
        let name = order.display_name();
        let total = order.total();
        Self { order, name, total }
    }
}

/// The payment confirmation posted by the storefront's checkout success page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmOrderRequest {
    /// The checkout session id (the order's payment reference)
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingsQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub message: String,
}

impl JsonResponse {
    pub fn success() -> Self {
        Self::new("success")
    }

    pub fn new<S: Display>(message: S) -> Self {
        Self { message: message.to_string() }
    }
}
