//! Project entity and per-project aggregation rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named unit of work to which time is attributed.
///
/// Names are unique across all projects; the id is the SQLite rowid assigned
/// on creation and stable for the project's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

/// One entry of a time breakdown: total seconds for a project over a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTotal {
    pub project_id: i64,
    pub name: String,
    pub seconds: i64,
    pub formatted: String,
}

impl ProjectTotal {
    pub fn new(project_id: i64, name: impl Into<String>, seconds: i64) -> Self {
        Self {
            project_id,
            name: name.into(),
            seconds,
            formatted: crate::format_seconds(seconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_total_carries_formatted_duration() {
        let total = ProjectTotal::new(3, "writing", 3661);
        assert_eq!(total.formatted, "01:01:01");
        assert_eq!(total.seconds, 3661);
        assert_eq!(total.name, "writing");
    }
}
