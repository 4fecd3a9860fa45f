//! # SQLite Database methods
//!
//! "Low-level" SQLite interactions, written as plain functions that accept a `&mut SqliteConnection`. Pass a pooled
//! connection for one-off queries, or `&mut tx` to fold several calls into one atomic transaction.
use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Error as SqlxError,
    SqlitePool,
};

pub mod links;
pub mod orders;
pub mod products;
pub mod rankings;
pub mod users;

/// Opens a connection pool, creating the database file if it does not exist yet.
pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await?;
    Ok(pool)
}
