//! Session entity: one contiguous start/stop interval of tracked time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tracked interval belonging to exactly one project.
///
/// A missing `end_time` marks the session as open (currently being tracked).
/// When present, `end_time >= start_time` is an invariant upheld by the
/// storage layer: sessions are only ever closed with a later wall-clock read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub project_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

impl Session {
    /// Whether the session is still open (no end timestamp).
    pub const fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// Elapsed whole seconds between start and end, truncated.
    ///
    /// Open sessions count up to `now`, so polling an active session yields a
    /// monotonically non-decreasing value.
    pub fn elapsed_at(&self, now: DateTime<Utc>) -> i64 {
        let end = self.end_time.unwrap_or(now);
        end.signed_duration_since(self.start_time).num_seconds()
    }
}
