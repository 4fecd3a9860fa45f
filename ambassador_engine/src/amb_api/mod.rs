//! # Ambassador engine public API
//!
//! * [`order_flow_api`] resolves referral links, prices orders and drives them from creation to completion.
//! * [`settlement_api`] credits ambassadors and sends notifications once an order completes.
//! * [`rankings_api`] reads the ambassador leaderboard.
//!
//! Both APIs are generic over the backend traits in [`crate::traits`]. Create an API instance by supplying a backend
//! that implements the traits it needs:
//!
//! ```rust,ignore
//! use ambassador_engine::{events::EventProducers, OrderFlowApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url("sqlite://data/ambassador_store.db", 5).await?;
//! let api = OrderFlowApi::new(db, my_gateway, EventProducers::default());
//! let orders = api.fetch_orders().await?;
//! ```
pub mod errors;
pub mod order_flow_api;
pub mod order_objects;
pub mod rankings_api;
pub mod settlement_api;
