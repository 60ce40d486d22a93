use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use trk_cli::commands::{export, project, report, tracking};
use trk_cli::{Cli, Commands, Config, ProjectAction};
use trk_db::Tracker;

/// Load config and open the tracker, ensuring the parent directory exists.
fn open_tracker(config_path: Option<&Path>) -> Result<Tracker> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    Tracker::open(&config.database_path).context("failed to open database")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // try_init so tests can initialize tracing first
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let mut stdout = std::io::stdout();

    match &cli.command {
        Some(Commands::Project { action }) => {
            let mut tracker = open_tracker(cli.config.as_deref())?;
            match action {
                ProjectAction::Add { name, summary } => {
                    project::add(&mut stdout, &mut tracker, name, summary)?;
                }
                ProjectAction::List => project::list(&mut stdout, &tracker)?,
                ProjectAction::Delete { name } => {
                    project::delete(&mut stdout, &mut tracker, name)?;
                }
            }
        }
        Some(Commands::Start { name }) => {
            let mut tracker = open_tracker(cli.config.as_deref())?;
            tracking::start(&mut stdout, &mut tracker, name.as_deref())?;
        }
        Some(Commands::Stop) => {
            let mut tracker = open_tracker(cli.config.as_deref())?;
            tracking::stop(&mut stdout, &mut tracker)?;
        }
        Some(Commands::Status { json }) => {
            let tracker = open_tracker(cli.config.as_deref())?;
            tracking::status(&mut stdout, &tracker, *json)?;
        }
        Some(Commands::Report { period, json }) => {
            let tracker = open_tracker(cli.config.as_deref())?;
            report::run(&mut stdout, &tracker, *period, *json)?;
        }
        Some(Commands::Export { output }) => {
            let tracker = open_tracker(cli.config.as_deref())?;
            export::run(&mut stdout, &tracker, output)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
