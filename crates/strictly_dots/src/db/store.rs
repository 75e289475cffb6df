//! Key-value stores.

use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::{DbError, KvEntry, NewKvEntry, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Minimal get/set contract the game session needs from storage.
pub trait KeyValueStore {
    /// Reads a value. `Ok(None)` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, DbError>;

    /// Writes a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<(), DbError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, DbError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DbError> {
        (**self).set(key, value)
    }
}

/// SQLite-backed store.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `db_path` and applies migrations.
    ///
    /// Use `":memory:"` only for throwaway checks: every operation opens a
    /// fresh connection, so an in-memory database does not persist between calls.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path.as_ref()))]
    pub fn open(db_path: impl AsRef<str>) -> Result<Self, DbError> {
        let store = Self {
            db_path: db_path.as_ref().to_string(),
        };
        let mut conn = store.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migrations failed: {}", e)))?;
        info!(path = %store.db_path, migrations = applied.len(), "Store opened");
        Ok(store)
    }

    /// Path this store writes to.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Reads the full entry for `key`, including its timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn entry(&self, key: &str) -> Result<Option<KvEntry>, DbError> {
        let mut conn = self.connection()?;
        let entry = schema::kv_entries::table
            .find(key)
            .select(KvEntry::as_select())
            .first(&mut conn)
            .optional()?;
        debug!(found = entry.is_some(), "Entry lookup");
        Ok(entry)
    }
}

impl KeyValueStore for SqliteStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, DbError> {
        Ok(self.entry(key)?.map(|entry| entry.value().clone()))
    }

    #[instrument(skip(self, value))]
    fn set(&mut self, key: &str, value: &str) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let entry = NewKvEntry::new(key.to_string(), value.to_string(), Utc::now().naive_utc());
        diesel::replace_into(schema::kv_entries::table)
            .values(&entry)
            .execute(&mut conn)?;
        debug!(bytes = value.len(), "Entry written");
        Ok(())
    }
}

/// In-memory store for tests and for running without a database.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, DbError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DbError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
    }
}
