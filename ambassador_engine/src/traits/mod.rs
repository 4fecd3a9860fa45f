//! #  Backend contracts.
//!
//! This module defines the interfaces that the ambassador engine needs from its collaborators. The order flow and
//! settlement APIs are written against these traits only, so backends can be swapped (or mocked) freely.
//!
//! ## Storage
//! * [`LinkManagement`] resolves referral codes to the ambassador who owns them.
//! * [`ProductCatalog`] provides read access to the current product catalog.
//! * [`OrderManagement`] is the transactional order store. It owns the transaction boundary for order creation and the
//!   atomic check-then-set used to complete orders.
//! * [`UserManagement`] looks up users (ambassadors).
//! * [`RankingStore`] is the ambassador leaderboard. It is only ever mutated by atomic increments.
//!
//! [`AmbassadorDatabase`] bundles the storage traits the order flow needs into a single bound.
//!
//! ## External services
//! * [`CheckoutGateway`] opens hosted payment sessions with the payment provider.
//! * [`Notifier`] delivers best-effort notifications (e-mail).
//!
//! The traits used from detached background tasks ([`UserManagement`], [`RankingStore`] and [`Notifier`]) return
//! `Send` futures so that they can be driven from `tokio::spawn`.
mod checkout_gateway;
mod errors;
mod link_management;
mod notifier;
mod order_management;
mod product_catalog;
mod ranking_store;
mod user_management;

pub use checkout_gateway::{CheckoutGateway, CheckoutGatewayError, CheckoutLineItem, CheckoutSession};
pub use errors::StoreError;
pub use link_management::LinkManagement;
pub use notifier::{Notification, Notifier, NotifierError};
pub use order_management::OrderManagement;
pub use product_catalog::ProductCatalog;
pub use ranking_store::RankingStore;
pub use user_management::UserManagement;

/// The storage behaviour required by [`crate::OrderFlowApi`].
pub trait AmbassadorDatabase: Clone + LinkManagement + ProductCatalog + OrderManagement {
    /// The URL of the database
    fn url(&self) -> &str;
}
