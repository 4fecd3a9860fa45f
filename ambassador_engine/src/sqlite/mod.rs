//! SQLite backend for the ambassador engine.
mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
