//! Key/value configuration store.
//!
//! Persists incidental state across process restarts, e.g. the most recently
//! tracked project id under [`CURRENT_PROJECT_KEY`]. Write-then-overwrite
//! only; there is no schema evolution concern.

use rusqlite::{OptionalExtension, params};

use crate::{Database, DbError};

/// Config key holding the id of the most recently started project.
pub const CURRENT_PROJECT_KEY: &str = "current_project_id";

impl Database {
    /// Returns the value for `key`, or `None` if unset.
    pub fn config_get(&self, key: &str) -> Result<Option<String>, DbError> {
        let value = self
            .conn
            .query_row("SELECT value FROM config WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Sets `key` to `value`, overwriting any existing value.
    pub fn config_set(&mut self, key: &str, value: &str) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO config (key, value) VALUES (?, ?)",
            params![key, value],
        )?;
        Ok(())
    }
}
