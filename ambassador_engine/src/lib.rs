//! Ambassador Engine
//!
//! The engine behind a referral storefront: a customer buys products through an ambassador's referral link, pays on
//! an external checkout page, and once the payment is confirmed the revenue is split between the platform and the
//! ambassador, the leaderboard is updated, and both parties are notified.
//!
//! The library is divided into three parts:
//! 1. Backend contracts ([`traits`]) and the data types that flow through them ([`db_types`]). The SQLite backend
//!    ([`SqliteDatabase`]) implements every storage trait. The payment gateway and mail transport are supplied by the
//!    caller.
//! 2. The public API ([`OrderFlowApi`], [`SettlementApi`] and [`RankingsApi`]), which is generic over the backend traits.
//! 3. A small pub-sub event system ([`events`]). Order completion publishes an event and settlement runs as its hook,
//!    detached from the request that confirmed the payment.
mod amb_api;

pub mod db_types;
pub mod events;
#[cfg(feature = "sqlite")]
mod sqlite;
pub mod traits;

pub use amb_api::{
    errors::OrderFlowError,
    order_flow_api::OrderFlowApi,
    order_objects,
    rankings_api::{RankingsApi, DEFAULT_LEADERBOARD_SIZE},
    settlement_api::{create_settlement_hooks, SettlementApi, SettlementReport, SettlementSummary, DEFAULT_ADMIN_EMAIL},
};
#[cfg(feature = "sqlite")]
pub use sqlite::{db as sqlite_db, SqliteDatabase};
