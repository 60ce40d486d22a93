//! CLI subcommand implementations.

pub mod export;
pub mod project;
pub mod report;
pub mod tracking;
