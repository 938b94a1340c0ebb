//! Tabs Block Storage Layer
//!
//! SQLite persistence for authored Tabs instances: container attributes
//! and ordered tab entries with their panel markup.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
