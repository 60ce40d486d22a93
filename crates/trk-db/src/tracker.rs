//! Controller facade over the registry, session tracker, and analytics.
//!
//! This is the surface front ends (CLI, menu bar) call. It is what actually
//! upholds the single-open-session invariant: [`Tracker::start_tracking`]
//! unconditionally stops any open session before starting the next one.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use trk_core::{Project, ProjectTotal, format_seconds};

use crate::{Database, DbError};

/// Facade owning the database connection.
pub struct Tracker {
    db: Database,
}

/// Result of successfully starting tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartedTracking {
    pub session_id: i64,
    pub project_id: i64,
    pub project_name: String,
    pub start_time: DateTime<Utc>,
}

/// Result of a stop request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StopOutcome {
    /// Nothing was being tracked; mutates nothing.
    NoActiveSession,
    Stopped {
        session_id: i64,
        project_name: String,
        elapsed_seconds: i64,
        elapsed_formatted: String,
        end_time: DateTime<Utc>,
    },
}

/// Current tracking state, recomputed from storage on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrackingStatus {
    Idle,
    Tracking {
        active_project: String,
        active_project_id: i64,
        elapsed_seconds: i64,
        elapsed_formatted: String,
        session_id: i64,
    },
}

/// One row of the CSV export: all-time total for a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub project_name: String,
    pub formatted_total: String,
    pub total_seconds: i64,
}

impl Tracker {
    /// Opens (and initializes if necessary) the store at `path`.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        Ok(Self {
            db: Database::open(path)?,
        })
    }

    /// Opens an in-memory store; used by tests.
    pub fn open_in_memory() -> Result<Self, DbError> {
        Ok(Self {
            db: Database::open_in_memory()?,
        })
    }

    /// Access to the underlying database.
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Mutable access to the underlying database.
    pub fn db_mut(&mut self) -> &mut Database {
        &mut self.db
    }

    /// Creates a project.
    pub fn create_project(&mut self, name: &str, summary: &str) -> Result<i64, DbError> {
        self.db.create_project(name, summary)
    }

    /// All projects, ordered by name.
    pub fn list_projects(&self) -> Result<Vec<Project>, DbError> {
        self.db.list_projects()
    }

    /// Deletes a project by name, cascading to its sessions.
    ///
    /// Returns whether the project existed.
    pub fn delete_project_by_name(&mut self, name: &str) -> Result<bool, DbError> {
        match self.db.project_by_name(name)? {
            Some(project) => self.db.delete_project(project.id),
            None => Ok(false),
        }
    }

    /// Starts tracking the named project.
    ///
    /// Any session still open is stopped first (silently; not an error when
    /// idle), then the new one starts. Fails with [`DbError::ProjectNotFound`]
    /// for an unknown name.
    pub fn start_tracking(&mut self, project_name: &str) -> Result<StartedTracking, DbError> {
        self.start_tracking_at(project_name, Utc::now())
    }

    pub(crate) fn start_tracking_at(
        &mut self,
        project_name: &str,
        now: DateTime<Utc>,
    ) -> Result<StartedTracking, DbError> {
        let project = self
            .db
            .project_by_name(project_name)?
            .ok_or_else(|| DbError::ProjectNotFound(project_name.to_string()))?;

        self.db.stop_session_at(None, now)?;
        let session_id = self.db.start_session_at(project.id, now)?;

        Ok(StartedTracking {
            session_id,
            project_id: project.id,
            project_name: project.name,
            start_time: now,
        })
    }

    /// Stops the active session, if any.
    pub fn stop_tracking(&mut self) -> Result<StopOutcome, DbError> {
        self.stop_tracking_at(Utc::now())
    }

    pub(crate) fn stop_tracking_at(&mut self, now: DateTime<Utc>) -> Result<StopOutcome, DbError> {
        let Some(active) = self.db.active_session()? else {
            return Ok(StopOutcome::NoActiveSession);
        };

        let project_name = self
            .db
            .project_by_id(active.project_id)?
            .map_or_else(|| "(deleted)".to_string(), |project| project.name);

        self.db.stop_session_at(Some(active.id), now)?;
        let elapsed_seconds = active.elapsed_at(now);

        Ok(StopOutcome::Stopped {
            session_id: active.id,
            project_name,
            elapsed_seconds,
            elapsed_formatted: format_seconds(elapsed_seconds),
            end_time: now,
        })
    }

    /// Current tracking status.
    pub fn status(&self) -> Result<TrackingStatus, DbError> {
        self.status_at(Utc::now())
    }

    pub(crate) fn status_at(&self, now: DateTime<Utc>) -> Result<TrackingStatus, DbError> {
        let Some(active) = self.db.active_session()? else {
            return Ok(TrackingStatus::Idle);
        };

        let project = self
            .db
            .project_by_id(active.project_id)?
            .ok_or_else(|| DbError::ProjectNotFound(active.project_id.to_string()))?;
        let elapsed_seconds = active.elapsed_at(now);

        Ok(TrackingStatus::Tracking {
            active_project: project.name,
            active_project_id: project.id,
            elapsed_seconds,
            elapsed_formatted: format_seconds(elapsed_seconds),
            session_id: active.id,
        })
    }

    /// Daily breakdown, defaulting to today.
    pub fn daily_breakdown(&self) -> Result<Vec<ProjectTotal>, DbError> {
        self.db.daily_breakdown(None)
    }

    /// Breakdown since Monday 00:00 local time.
    pub fn weekly_breakdown(&self) -> Result<Vec<ProjectTotal>, DbError> {
        self.db.weekly_breakdown()
    }

    /// All-time breakdown.
    pub fn total_breakdown(&self) -> Result<Vec<ProjectTotal>, DbError> {
        self.db.total_breakdown()
    }

    /// One export row per project (all-time total), in registry name order.
    pub fn export_rows(&self) -> Result<Vec<ExportRow>, DbError> {
        self.export_rows_at(Utc::now())
    }

    pub(crate) fn export_rows_at(&self, now: DateTime<Utc>) -> Result<Vec<ExportRow>, DbError> {
        let mut rows = Vec::new();
        for project in self.db.list_projects()? {
            let total_seconds = self
                .db
                .project_time_between(project.id, None, None, now)?;
            rows.push(ExportRow {
                project_name: project.name,
                formatted_total: format_seconds(total_seconds),
                total_seconds,
            });
        }
        Ok(rows)
    }
}
