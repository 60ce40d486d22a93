//! Session tracking: start/stop/query of tracked intervals.
//!
//! The system is a two-state machine over the whole store: Idle (no open
//! session) and Tracking (exactly one open session). The open session is
//! always recomputed from storage, never cached in memory, so state survives
//! process restarts.

use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, params, params_from_iter, types::Value};
use trk_core::Session;

use crate::{Database, DbError, config::CURRENT_PROJECT_KEY, format_timestamp, parse_timestamp};

const SESSION_COLUMNS: &str = "id, project_id, start_time, end_time";

impl Database {
    /// Starts a session for `project_id` at the current wall-clock time.
    ///
    /// Fails with [`DbError::ProjectNotFound`] if the project does not exist.
    /// The project id is also persisted into config under
    /// [`CURRENT_PROJECT_KEY`] so the most recent project survives restarts.
    ///
    /// This does *not* close a previously open session: callers that need the
    /// single-open-session invariant must stop first, or go through
    /// [`Tracker::start_tracking`](crate::Tracker::start_tracking) which does
    /// so unconditionally.
    pub fn start_session(&mut self, project_id: i64) -> Result<i64, DbError> {
        self.start_session_at(project_id, Utc::now())
    }

    pub(crate) fn start_session_at(
        &mut self,
        project_id: i64,
        now: DateTime<Utc>,
    ) -> Result<i64, DbError> {
        if self.project_by_id(project_id)?.is_none() {
            return Err(DbError::ProjectNotFound(project_id.to_string()));
        }

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO sessions (project_id, start_time) VALUES (?, ?)",
            params![project_id, format_timestamp(now)],
        )?;
        let session_id = tx.last_insert_rowid();
        tx.execute(
            "INSERT OR REPLACE INTO config (key, value) VALUES (?, ?)",
            params![CURRENT_PROJECT_KEY, project_id.to_string()],
        )?;
        tx.commit()?;

        tracing::debug!(session_id, project_id, "session started");
        Ok(session_id)
    }

    /// Stops a session by setting its end timestamp to now.
    ///
    /// With no id, resolves to the most-recently-started open session.
    /// Returns `false` (a no-op, not an error) when there is nothing to stop.
    pub fn stop_session(&mut self, session_id: Option<i64>) -> Result<bool, DbError> {
        self.stop_session_at(session_id, Utc::now())
    }

    pub(crate) fn stop_session_at(
        &mut self,
        session_id: Option<i64>,
        now: DateTime<Utc>,
    ) -> Result<bool, DbError> {
        let session_id = match session_id {
            Some(id) => id,
            None => match self.active_session()? {
                Some(session) => session.id,
                None => return Ok(false),
            },
        };

        let affected = self.conn.execute(
            "UPDATE sessions SET end_time = ? WHERE id = ?",
            params![format_timestamp(now), session_id],
        )?;
        if affected > 0 {
            tracing::debug!(session_id, "session stopped");
        }
        Ok(affected > 0)
    }

    /// The most-recently-started open session, or `None` when idle.
    pub fn active_session(&self) -> Result<Option<Session>, DbError> {
        let row = self
            .conn
            .query_row(
                &format!(
                    "SELECT {SESSION_COLUMNS} FROM sessions
                     WHERE end_time IS NULL
                     ORDER BY start_time DESC LIMIT 1"
                ),
                [],
                session_row,
            )
            .optional()?;
        row.map(into_session).transpose()
    }

    /// Fetches a session by id.
    pub fn session_by_id(&self, id: i64) -> Result<Option<Session>, DbError> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE id = ?"),
                [id],
                session_row,
            )
            .optional()?;
        row.map(into_session).transpose()
    }

    /// Elapsed whole seconds for the given session, truncated.
    ///
    /// With no id, resolves to the active session; returns 0 when idle or
    /// when the id does not exist.
    pub fn elapsed_seconds(&self, session_id: Option<i64>) -> Result<i64, DbError> {
        self.elapsed_seconds_at(session_id, Utc::now())
    }

    pub(crate) fn elapsed_seconds_at(
        &self,
        session_id: Option<i64>,
        now: DateTime<Utc>,
    ) -> Result<i64, DbError> {
        let session = match session_id {
            Some(id) => self.session_by_id(id)?,
            None => self.active_session()?,
        };
        Ok(session.map_or(0, |session| session.elapsed_at(now)))
    }

    /// Sessions for a project, most-recent-first.
    ///
    /// The optional bounds form a half-open filter `[start, end)` on the
    /// session *start* time: a session straddling a boundary belongs wholly
    /// to the window it started in.
    pub fn sessions_for_project(
        &self,
        project_id: i64,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<Session>, DbError> {
        let mut query = format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE project_id = ?");
        let mut params: Vec<Value> = vec![Value::Integer(project_id)];

        if let Some(start) = start {
            query.push_str(" AND start_time >= ?");
            params.push(Value::Text(format_timestamp(start)));
        }
        if let Some(end) = end {
            query.push_str(" AND start_time < ?");
            params.push(Value::Text(format_timestamp(end)));
        }
        query.push_str(" ORDER BY start_time DESC");

        let mut stmt = self.conn.prepare(&query)?;
        let rows = stmt.query_map(params_from_iter(params), session_row)?;
        let mut sessions = Vec::new();
        for row in rows {
            sessions.push(into_session(row?)?);
        }
        Ok(sessions)
    }
}

type SessionRow = (i64, i64, String, Option<String>);

fn session_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SessionRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn into_session((id, project_id, start_time, end_time): SessionRow) -> Result<Session, DbError> {
    Ok(Session {
        id,
        project_id,
        start_time: parse_timestamp(&start_time, "start_time")?,
        end_time: end_time
            .map(|value| parse_timestamp(&value, "end_time"))
            .transpose()?,
    })
}
