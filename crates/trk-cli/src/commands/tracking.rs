//! `trk start`, `trk stop`, and `trk status`.

use std::io::Write;

use anyhow::{Context, Result, bail};
use trk_db::{StopOutcome, Tracker, TrackingStatus};

/// Config key holding the most recently tracked project id.
const CURRENT_PROJECT_KEY: &str = "current_project_id";

/// Starts tracking `name`, or resumes the most recent project when omitted.
pub fn start<W: Write>(writer: &mut W, tracker: &mut Tracker, name: Option<&str>) -> Result<()> {
    let name = match name {
        Some(name) => name.to_string(),
        None => last_project_name(tracker)?,
    };

    let started = tracker.start_tracking(&name)?;
    tracing::debug!(session_id = started.session_id, "tracking started");
    writeln!(writer, "Tracking '{}'", started.project_name)?;
    Ok(())
}

/// Resolves the most recently tracked project from the config store.
fn last_project_name(tracker: &Tracker) -> Result<String> {
    let Some(value) = tracker.db().config_get(CURRENT_PROJECT_KEY)? else {
        bail!("no project given and nothing tracked before; run 'trk start <name>'");
    };
    let id: i64 = value
        .parse()
        .with_context(|| format!("malformed {CURRENT_PROJECT_KEY} config value: {value}"))?;
    let Some(project) = tracker.db().project_by_id(id)? else {
        bail!("last tracked project no longer exists; run 'trk start <name>'");
    };
    Ok(project.name)
}

pub fn stop<W: Write>(writer: &mut W, tracker: &mut Tracker) -> Result<()> {
    match tracker.stop_tracking()? {
        StopOutcome::NoActiveSession => {
            writeln!(writer, "No active session to stop.")?;
        }
        StopOutcome::Stopped {
            project_name,
            elapsed_formatted,
            ..
        } => {
            writeln!(writer, "Stopped '{project_name}'")?;
            writeln!(writer, "  Time: {elapsed_formatted}")?;
        }
    }
    Ok(())
}

pub fn status<W: Write>(writer: &mut W, tracker: &Tracker, json: bool) -> Result<()> {
    let status = tracker.status()?;
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&status)?)?;
        return Ok(());
    }

    match status {
        TrackingStatus::Idle => writeln!(writer, "Not tracking anything")?,
        TrackingStatus::Tracking {
            active_project,
            elapsed_formatted,
            ..
        } => {
            writeln!(writer, "Tracking: {active_project}")?;
            writeln!(writer, "Elapsed: {elapsed_formatted}")?;
        }
    }
    Ok(())
}
