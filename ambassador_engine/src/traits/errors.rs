use thiserror::Error;

use crate::traits::CheckoutGatewayError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Could not run database migrations: {0}")]
    MigrationError(String),
    #[error("Order #{0} does not exist")]
    OrderNotFound(i64),
    #[error("No order matches payment reference {0}")]
    PaymentReferenceNotFound(String),
    #[error("Order #{0} already has a payment reference")]
    PaymentReferenceAlreadySet(i64),
    #[error("An order must contain at least one line item")]
    EmptyOrder,
    #[error("The checkout session could not be created, so the order was rolled back. {0}")]
    CheckoutFailed(#[from] CheckoutGatewayError),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::DatabaseError(e.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationError(e.to_string())
    }
}
