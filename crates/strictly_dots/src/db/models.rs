//! Database models.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use crate::db::schema;

/// Stored key-value entry.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::kv_entries)]
pub struct KvEntry {
    name: String,
    value: String,
    updated_at: NaiveDateTime,
}

/// Insertable entry; written with `REPLACE INTO` so it doubles as an update.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::kv_entries)]
pub struct NewKvEntry {
    name: String,
    value: String,
    updated_at: NaiveDateTime,
}
