//! Key-value persistence for cross-session statistics.

mod error;
mod models;
mod schema; // Diesel generated schema - internal use only
mod store;

pub use error::DbError;
pub use models::{KvEntry, NewKvEntry};
pub use store::{KeyValueStore, MemoryStore, SqliteStore};
