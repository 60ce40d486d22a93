//! Project registry: CRUD over named projects.

use chrono::Utc;
use rusqlite::{OptionalExtension, params};
use trk_core::Project;

use crate::{Database, DbError, format_timestamp, parse_timestamp};

const PROJECT_COLUMNS: &str = "id, name, summary, created_at";

impl Database {
    /// Creates a project, returning its id.
    ///
    /// Fails with [`DbError::DuplicateName`] if a project with the same name
    /// already exists (case-sensitive exact match).
    pub fn create_project(&mut self, name: &str, summary: &str) -> Result<i64, DbError> {
        if name.is_empty() {
            return Err(DbError::EmptyProjectName);
        }
        self.conn
            .execute(
                "INSERT INTO projects (name, summary, created_at) VALUES (?, ?, ?)",
                params![name, summary, format_timestamp(Utc::now())],
            )
            .map_err(|err| crate::map_name_collision(err, name))?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, name, "project created");
        Ok(id)
    }

    /// Looks up a project by id.
    pub fn project_by_id(&self, id: i64) -> Result<Option<Project>, DbError> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?"),
                [id],
                project_row,
            )
            .optional()?;
        row.map(into_project).transpose()
    }

    /// Looks up a project by exact name.
    pub fn project_by_name(&self, name: &str) -> Result<Option<Project>, DbError> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE name = ?"),
                [name],
                project_row,
            )
            .optional()?;
        row.map(into_project).transpose()
    }

    /// Lists all projects, ordered by name ascending.
    pub fn list_projects(&self) -> Result<Vec<Project>, DbError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY name ASC"))?;
        let rows = stmt.query_map([], project_row)?;
        let mut projects = Vec::new();
        for row in rows {
            projects.push(into_project(row?)?);
        }
        Ok(projects)
    }

    /// Partially updates a project's name and/or summary.
    ///
    /// Returns whether a row was affected. Renaming onto an existing name
    /// fails with [`DbError::DuplicateName`]; passing neither field is a
    /// no-op returning `false`.
    pub fn update_project(
        &mut self,
        id: i64,
        name: Option<&str>,
        summary: Option<&str>,
    ) -> Result<bool, DbError> {
        if matches!(name, Some("")) {
            return Err(DbError::EmptyProjectName);
        }
        let affected = match (name, summary) {
            (None, None) => return Ok(false),
            (Some(name), None) => self
                .conn
                .execute("UPDATE projects SET name = ? WHERE id = ?", params![name, id])
                .map_err(|err| crate::map_name_collision(err, name))?,
            (None, Some(summary)) => self.conn.execute(
                "UPDATE projects SET summary = ? WHERE id = ?",
                params![summary, id],
            )?,
            (Some(name), Some(summary)) => self
                .conn
                .execute(
                    "UPDATE projects SET name = ?, summary = ? WHERE id = ?",
                    params![name, summary, id],
                )
                .map_err(|err| crate::map_name_collision(err, name))?,
        };
        Ok(affected > 0)
    }

    /// Deletes a project and, via cascade, all of its sessions.
    ///
    /// Returns whether the project existed.
    pub fn delete_project(&mut self, id: i64) -> Result<bool, DbError> {
        let affected = self
            .conn
            .execute("DELETE FROM projects WHERE id = ?", [id])?;
        if affected > 0 {
            tracing::debug!(id, "project deleted");
        }
        Ok(affected > 0)
    }
}

type ProjectRow = (i64, String, String, String);

fn project_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProjectRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn into_project((id, name, summary, created_at): ProjectRow) -> Result<Project, DbError> {
    Ok(Project {
        id,
        name,
        summary,
        created_at: parse_timestamp(&created_at, "created_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_fetch_project() {
        let mut db = Database::open_in_memory().unwrap();
        let id = db.create_project("writing", "blog posts").unwrap();

        let by_id = db.project_by_id(id).unwrap().unwrap();
        assert_eq!(by_id.name, "writing");
        assert_eq!(by_id.summary, "blog posts");

        let by_name = db.project_by_name("writing").unwrap().unwrap();
        assert_eq!(by_name.id, id);
    }

    #[test]
    fn missing_project_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.project_by_id(42).unwrap().is_none());
        assert!(db.project_by_name("nope").unwrap().is_none());
    }

    #[test]
    fn duplicate_name_is_rejected_without_adding_a_row() {
        let mut db = Database::open_in_memory().unwrap();
        db.create_project("writing", "").unwrap();

        let err = db.create_project("writing", "again").unwrap_err();
        assert!(matches!(err, DbError::DuplicateName(name) if name == "writing"));
        assert_eq!(db.list_projects().unwrap().len(), 1);
    }

    #[test]
    fn name_matching_is_case_sensitive() {
        let mut db = Database::open_in_memory().unwrap();
        db.create_project("Writing", "").unwrap();
        db.create_project("writing", "").unwrap();
        assert!(db.project_by_name("WRITING").unwrap().is_none());
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut db = Database::open_in_memory().unwrap();
        assert!(matches!(
            db.create_project("", ""),
            Err(DbError::EmptyProjectName)
        ));
        let id = db.create_project("ok", "").unwrap();
        assert!(matches!(
            db.update_project(id, Some(""), None),
            Err(DbError::EmptyProjectName)
        ));
    }

    #[test]
    fn list_is_ordered_by_name() {
        let mut db = Database::open_in_memory().unwrap();
        for name in ["zeta", "alpha", "mid"] {
            db.create_project(name, "").unwrap();
        }
        let names: Vec<String> = db
            .list_projects()
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn partial_update_touches_only_given_fields() {
        let mut db = Database::open_in_memory().unwrap();
        let id = db.create_project("writing", "old summary").unwrap();

        assert!(db.update_project(id, None, Some("new summary")).unwrap());
        let project = db.project_by_id(id).unwrap().unwrap();
        assert_eq!(project.name, "writing");
        assert_eq!(project.summary, "new summary");

        assert!(db.update_project(id, Some("blog"), None).unwrap());
        let project = db.project_by_id(id).unwrap().unwrap();
        assert_eq!(project.name, "blog");
        assert_eq!(project.summary, "new summary");

        assert!(!db.update_project(id, None, None).unwrap());
    }

    #[test]
    fn rename_collision_is_rejected() {
        let mut db = Database::open_in_memory().unwrap();
        db.create_project("writing", "").unwrap();
        let id = db.create_project("coding", "").unwrap();

        let err = db.update_project(id, Some("writing"), None).unwrap_err();
        assert!(matches!(err, DbError::DuplicateName(name) if name == "writing"));
        // unchanged
        assert_eq!(db.project_by_id(id).unwrap().unwrap().name, "coding");
    }

    #[test]
    fn update_missing_project_returns_false() {
        let mut db = Database::open_in_memory().unwrap();
        assert!(!db.update_project(99, Some("ghost"), None).unwrap());
    }

    #[test]
    fn delete_reports_existence() {
        let mut db = Database::open_in_memory().unwrap();
        let id = db.create_project("writing", "").unwrap();
        assert!(db.delete_project(id).unwrap());
        assert!(!db.delete_project(id).unwrap());
    }
}
