//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Personal project time tracker.
///
/// Records start/stop sessions against named projects and reports
/// per-project totals for the day, the week, or all time.
#[derive(Debug, Parser)]
#[command(name = "trk", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage projects.
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Start tracking a project.
    ///
    /// Stops whatever was being tracked first; with no name, resumes the
    /// most recently tracked project.
    Start {
        /// Project name. Defaults to the last tracked project.
        name: Option<String>,
    },

    /// Stop tracking the current project.
    Stop,

    /// Show current tracking status.
    Status {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// View per-project time reports.
    Report {
        /// Reporting window.
        #[arg(value_enum)]
        period: ReportPeriod,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Export all-time totals to a CSV file.
    Export {
        /// Output file path.
        #[arg(short, long, default_value = "timetracker_export.csv")]
        output: PathBuf,
    },
}

/// Project management actions.
#[derive(Debug, Subcommand)]
pub enum ProjectAction {
    /// Add a new project.
    Add {
        /// Project name (must be unique).
        name: String,

        /// Free-text project summary.
        #[arg(long, default_value = "")]
        summary: String,
    },

    /// List all projects with their all-time totals.
    List,

    /// Delete a project and all of its sessions.
    Delete {
        /// Project name.
        name: String,
    },
}

/// Reporting window selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportPeriod {
    /// Today, local midnight to midnight.
    Today,
    /// Since Monday 00:00 local time.
    Week,
    /// All time.
    Total,
}
