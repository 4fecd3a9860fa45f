//! A minimal client for the Stripe Checkout Sessions REST API.
//!
//! Only the call the ambassador store needs is implemented: creating a hosted checkout session for a set of line
//! items. Prices are sent as integer minor units (`unit_amount`).
mod api;
mod config;
mod error;

mod data_objects;
pub mod helpers;

pub use api::StripeApi;
pub use config::StripeConfig;
pub use data_objects::{CheckoutSession, NewCheckoutSession, SessionLineItem, StripeErrorBody};
pub use error::StripeApiError;
