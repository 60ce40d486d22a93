//! Storage layer for the project time tracker.
//!
//! Provides persistence for projects, sessions, and key/value configuration
//! using `rusqlite`, plus the read-side analytics queries and the [`Tracker`]
//! facade that the CLI (and any other front end) drives.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but
//! not `Sync`. A `Database` instance can be moved between threads but cannot
//! be shared across threads without external synchronization. The tracker is
//! single-process by design; a display front end polling [`Tracker::status`]
//! on a timer re-reads state from storage each tick, so a stale read
//! self-corrects on the next tick.
//!
//! # Schema
//!
//! Timestamps are stored as TEXT in RFC 3339 UTC format with millisecond
//! precision (e.g., `2024-01-15T10:30:00.000Z`). This format ensures:
//! - Lexicographic ordering matches chronological ordering
//! - Human-readable values in the database
//! - Timezone-aware (always UTC)
//!
//! An open session is a row in `sessions` with a NULL `end_time`. The
//! "at most one open session" invariant is upheld by
//! [`Tracker::start_tracking`] stopping any open session before starting a
//! new one; see [`Database::start_session`] for the caller obligation when
//! bypassing the facade.

mod analytics;
mod config;
mod projects;
mod sessions;
mod tracker;

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Connection;
use thiserror::Error;

pub use tracker::{ExportRow, StartedTracking, StopOutcome, Tracker, TrackingStatus};

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database (disk, corruption, I/O).
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A project with this name already exists.
    #[error("project '{0}' already exists")]
    DuplicateName(String),
    /// The referenced project does not exist.
    #[error("project '{0}' not found")]
    ProjectNotFound(String),
    /// Project names must be non-empty.
    #[error("project name must not be empty")]
    EmptyProjectName,
    /// Failed to parse a stored timestamp.
    #[error("invalid timestamp in {column}: {value}")]
    TimestampParse {
        column: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    pub(crate) conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS projects (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT UNIQUE NOT NULL,
                summary TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL
            );

            -- Sessions table: one row per tracked interval
            -- end_time IS NULL marks the open (active) session
            CREATE TABLE IF NOT EXISTS sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                project_id INTEGER NOT NULL,
                start_time TEXT NOT NULL,
                end_time TEXT,
                FOREIGN KEY (project_id) REFERENCES projects(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_sessions_project ON sessions(project_id);
            CREATE INDEX IF NOT EXISTS idx_sessions_start ON sessions(start_time);

            CREATE TABLE IF NOT EXISTS config (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }
}

/// Maps unique-constraint violations to [`DbError::DuplicateName`].
///
/// The projects table has a single uniqueness constraint (on `name`), so any
/// constraint violation from an insert/rename is a name collision.
fn map_name_collision(err: rusqlite::Error, name: &str) -> DbError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            DbError::DuplicateName(name.to_string())
        }
        _ => DbError::Sqlite(err),
    }
}

pub(crate) fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn parse_timestamp(value: &str, column: &'static str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|source| DbError::TimestampParse {
            column,
            value: value.to_string(),
            source,
        })
}
