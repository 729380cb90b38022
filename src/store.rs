//! Whole-collection key-value persistence.
//!
//! Every collection the app owns (workout history, weight entries, meals,
//! templates, ...) is persisted as a single JSON blob under a fixed key.
//! Mutations always replace the whole value, so there is never a partial
//! update on disk. A missing or malformed value reads back as `None` and the
//! caller falls back to its default.

use rusqlite::OptionalExtension;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::DbPool;
use crate::error::Result;

/// Fixed logical keys for every persisted collection and scalar.
pub mod keys {
    pub const WORKOUTS: &str = "workouts";
    pub const WEIGHT_ENTRIES: &str = "weight_entries";
    pub const MEALS: &str = "meals";
    pub const SAVED_MEALS: &str = "saved_meals";
    pub const EXERCISES: &str = "exercises";
    pub const CALORIE_GOAL: &str = "calorie_goal";
    pub const WEIGHT_GOAL: &str = "weight_goal";
    pub const COMPLETED_WEEKS: &str = "completed_weeks";
    pub const TEMPLATES: &str = "templates";
    pub const ACTIVE_TEMPLATE_ID: &str = "active_template_id";
    pub const DARK_MODE: &str = "dark_mode";
    pub const SCHEDULE_STATE: &str = "schedule_state";
}

#[derive(Clone)]
pub struct KvStore {
    pool: DbPool,
}

impl KvStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Load the value stored under `key`, or `None` if it is missing or
    /// cannot be decoded. Malformed values are logged and treated as absent.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let conn = self.pool.get()?;
        let raw: Option<String> = conn
            .query_row("SELECT value FROM store WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()?;

        match raw {
            Some(json) => match serde_json::from_str(&json) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    tracing::warn!("Discarding malformed value under key {:?}: {}", key, e);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Replace the value stored under `key`.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO store (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            rusqlite::params![key, json],
        )?;
        Ok(())
    }

    /// Remove the value stored under `key`, if any.
    pub fn delete(&self, key: &str) -> Result<()> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM store WHERE key = ?", [key])?;
        Ok(())
    }
}
