//! # Ambassador store server
//!
//! Exposes the ambassador engine over HTTP. Customers create orders through an ambassador's referral link and are
//! sent to a Stripe hosted checkout page. The storefront then posts the checkout session id back to confirm the
//! order, which triggers settlement in the background.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! * `GET /health`: returns 200 OK.
//! * `GET /api/orders`: every order, with its line items, the customer's name and the order total.
//! * `POST /api/orders`: creates an order and returns the checkout session `{id, url}`.
//! * `POST /api/orders/confirm`: confirms payment for the order whose payment reference is `source`.
//! * `GET /api/rankings`: the ambassador leaderboard.
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
