use thiserror::Error;

use crate::traits::{CheckoutGatewayError, StoreError};

#[derive(Debug, Error)]
pub enum OrderFlowError {
    #[error("Invalid request. {0}")]
    InvalidRequest(String),
    #[error("The referral link '{0}' does not exist")]
    LinkNotFound(String),
    #[error("Product #{0} does not exist")]
    InvalidProduct(i64),
    #[error("Order {0} does not exist")]
    OrderNotFound(String),
    #[error("Could not create the checkout session. {0}")]
    CheckoutFailed(CheckoutGatewayError),
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<StoreError> for OrderFlowError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::OrderNotFound(id) => OrderFlowError::OrderNotFound(format!("#{id}")),
            StoreError::PaymentReferenceNotFound(reference) => OrderFlowError::OrderNotFound(reference),
            StoreError::CheckoutFailed(e) => OrderFlowError::CheckoutFailed(e),
            StoreError::EmptyOrder => OrderFlowError::InvalidRequest(e.to_string()),
            StoreError::DatabaseError(s) | StoreError::MigrationError(s) => OrderFlowError::DatabaseError(s),
            StoreError::PaymentReferenceAlreadySet(_) => OrderFlowError::InternalError(e.to_string()),
        }
    }
}
