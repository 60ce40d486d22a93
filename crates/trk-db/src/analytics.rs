//! Read-side aggregation: per-project time breakdowns over reporting windows.
//!
//! Durations are summed per session as whole seconds between `start_time` and
//! `COALESCE(end_time, now)`, truncated. Sessions are never clipped to the
//! window: the filter is on start time only, so a session spanning midnight
//! counts wholly toward the day it started, including the portion past
//! midnight.

use chrono::{DateTime, Local, NaiveDate, Utc};
use rusqlite::params_from_iter;
use rusqlite::types::Value;
use trk_core::ProjectTotal;
use trk_core::window::{day_bounds, week_start};

use crate::{Database, DbError, format_timestamp};

impl Database {
    /// Per-project totals for the given day (default: today), ordered by
    /// seconds descending.
    pub fn daily_breakdown(&self, date: Option<NaiveDate>) -> Result<Vec<ProjectTotal>, DbError> {
        let date = date.unwrap_or_else(|| Local::now().date_naive());
        let (start, end) = day_bounds(date);
        self.breakdown_between(Some(start), Some(end), Utc::now())
    }

    /// Per-project totals since Monday 00:00 local time, open-ended up to now.
    pub fn weekly_breakdown(&self) -> Result<Vec<ProjectTotal>, DbError> {
        let start = week_start(Local::now().date_naive());
        self.breakdown_between(Some(start), None, Utc::now())
    }

    /// All-time per-project totals.
    pub fn total_breakdown(&self) -> Result<Vec<ProjectTotal>, DbError> {
        self.breakdown_between(None, None, Utc::now())
    }

    pub(crate) fn breakdown_between(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<Vec<ProjectTotal>, DbError> {
        // unixepoch with 'subsec' keeps whole-second truncation exact;
        // julianday arithmetic drifts by float round-off at this magnitude
        let mut query = String::from(
            "SELECT p.id, p.name, SUM(
                 CAST(unixepoch(COALESCE(s.end_time, ?), 'subsec') -
                      unixepoch(s.start_time, 'subsec') AS INTEGER)
             ) AS total_seconds
             FROM sessions s
             JOIN projects p ON s.project_id = p.id",
        );
        let mut params: Vec<Value> = vec![Value::Text(format_timestamp(now))];

        match (start, end) {
            (Some(start), Some(end)) => {
                query.push_str(" WHERE s.start_time >= ? AND s.start_time < ?");
                params.push(Value::Text(format_timestamp(start)));
                params.push(Value::Text(format_timestamp(end)));
            }
            (Some(start), None) => {
                query.push_str(" WHERE s.start_time >= ?");
                params.push(Value::Text(format_timestamp(start)));
            }
            (None, Some(end)) => {
                query.push_str(" WHERE s.start_time < ?");
                params.push(Value::Text(format_timestamp(end)));
            }
            (None, None) => {}
        }
        query.push_str(
            " GROUP BY p.id, p.name
              ORDER BY total_seconds DESC, p.name ASC",
        );

        let mut stmt = self.conn.prepare(&query)?;
        let rows = stmt.query_map(params_from_iter(params), |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<i64>>(2)?,
            ))
        })?;

        let mut totals = Vec::new();
        for row in rows {
            let (project_id, name, seconds) = row?;
            totals.push(ProjectTotal::new(project_id, name, seconds.unwrap_or_default()));
        }
        Ok(totals)
    }

    /// Seconds spent on a project today.
    pub fn project_time_today(&self, project_id: i64) -> Result<i64, DbError> {
        let (start, end) = day_bounds(Local::now().date_naive());
        self.project_time_between(project_id, Some(start), Some(end), Utc::now())
    }

    /// Seconds spent on a project since Monday 00:00 local time.
    pub fn project_time_week(&self, project_id: i64) -> Result<i64, DbError> {
        let start = week_start(Local::now().date_naive());
        self.project_time_between(project_id, Some(start), None, Utc::now())
    }

    /// Seconds spent on a project, all time.
    pub fn project_time_total(&self, project_id: i64) -> Result<i64, DbError> {
        self.project_time_between(project_id, None, None, Utc::now())
    }

    /// Sums per-session elapsed seconds in Rust rather than via the grouped
    /// query; the two paths must agree for the same project and window.
    pub(crate) fn project_time_between(
        &self,
        project_id: i64,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<i64, DbError> {
        let sessions = self.sessions_for_project(project_id, start, end)?;
        Ok(sessions.iter().map(|session| session.elapsed_at(now)).sum())
    }
}
