use amb_common::Cents;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db_types::Order;

/// A product line as presented on the payment provider's checkout page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLineItem {
    pub title: String,
    pub description: String,
    pub image: String,
    pub unit_price: Cents,
    pub quantity: i64,
}

/// The payment session descriptor returned to the customer. `id` doubles as the order's payment reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Error)]
pub enum CheckoutGatewayError {
    #[error("The payment gateway is not configured correctly. {0}")]
    Misconfigured(String),
    #[error("The checkout request is invalid. {0}")]
    InvalidRequest(String),
    #[error("The payment gateway could not be reached. {0}")]
    Unavailable(String),
    #[error("The payment gateway rejected the request ({status}). {message}")]
    Rejected { status: u16, message: String },
}

/// Opens hosted checkout sessions with an external payment provider.
///
/// Implementations hold the fixed success and cancel destinations; callers only supply the order and its lines.
#[allow(async_fn_in_trait)]
pub trait CheckoutGateway {
    async fn create_checkout_session(
        &self,
        order: &Order,
        items: &[CheckoutLineItem],
    ) -> Result<CheckoutSession, CheckoutGatewayError>;
}
