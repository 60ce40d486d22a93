//! `trk project` subcommands: add, list, delete.

use std::io::Write;

use anyhow::Result;
use trk_db::Tracker;

pub fn add<W: Write>(writer: &mut W, tracker: &mut Tracker, name: &str, summary: &str) -> Result<()> {
    let id = tracker.create_project(name, summary)?;
    writeln!(writer, "Created project '{name}' (id {id})")?;
    Ok(())
}

/// Lists projects with their all-time totals.
pub fn list<W: Write>(writer: &mut W, tracker: &Tracker) -> Result<()> {
    let projects = tracker.list_projects()?;
    if projects.is_empty() {
        writeln!(writer, "No projects yet.")?;
        return Ok(());
    }

    writeln!(writer, "Projects:")?;
    for project in projects {
        let total = tracker.db().project_time_total(project.id)?;
        if project.summary.is_empty() {
            writeln!(writer, "  [{}] {}", project.id, project.name)?;
        } else {
            writeln!(writer, "  [{}] {} - {}", project.id, project.name, project.summary)?;
        }
        writeln!(writer, "       Total: {}", trk_core::format_seconds(total))?;
    }
    Ok(())
}

pub fn delete<W: Write>(writer: &mut W, tracker: &mut Tracker, name: &str) -> Result<()> {
    if tracker.delete_project_by_name(name)? {
        writeln!(writer, "Deleted project '{name}'")?;
    } else {
        writeln!(writer, "Project '{name}' not found")?;
    }
    Ok(())
}
