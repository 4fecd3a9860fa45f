use amb_common::Cents;
use serde::{Deserialize, Serialize};

use crate::{
    db_types::{Customer, NewOrder, Order},
    traits::{CheckoutLineItem, CheckoutSession},
};

/// The platform's share of every line item, in whole percent. The ambassador receives the remainder.
pub const DEFAULT_PLATFORM_REVENUE_PERCENT: u8 = 10;

/// A customer's request to buy products through a referral link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrderRequest {
    pub code: String,
    #[serde(flatten)]
    pub customer: Customer,
    #[serde(default)]
    pub products: Vec<ProductQuantity>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuantity {
    pub product_id: i64,
    pub quantity: i64,
}

impl ProductQuantity {
    pub fn new(product_id: i64, quantity: i64) -> Self {
        Self { product_id, quantity }
    }
}

/// An order aggregate that has been priced and split, but not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledOrder {
    pub order: NewOrder,
    /// The same lines as `order.items`, with the catalog details the checkout page displays.
    pub checkout_items: Vec<CheckoutLineItem>,
}

/// The result of a successful order creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreated {
    pub order: Order,
    pub session: CheckoutSession,
}

/// How a line total is divided between the platform and the ambassador.
///
/// The platform share is rounded down to the nearest cent and the ambassador receives exactly the rest, so the two
/// shares always add up to the line total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueSplit {
    platform_percent: u8,
}

impl Default for RevenueSplit {
    fn default() -> Self {
        Self { platform_percent: DEFAULT_PLATFORM_REVENUE_PERCENT }
    }
}

impl RevenueSplit {
    /// Returns `None` if `platform_percent` is greater than 100.
    pub fn new(platform_percent: u8) -> Option<Self> {
        (platform_percent <= 100).then_some(Self { platform_percent })
    }

    pub fn platform_percent(&self) -> u8 {
        self.platform_percent
    }

    /// Returns `(platform_share, ambassador_share)`.
    pub fn split(&self, line_total: Cents) -> (Cents, Cents) {
        let platform = line_total.percentage(self.platform_percent);
        (platform, line_total - platform)
    }
}
