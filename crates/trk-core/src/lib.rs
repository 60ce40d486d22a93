//! Core domain logic for the project time tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Projects and sessions: the entities time is attributed to
//! - Duration formatting: `HH:MM:SS` rendering of whole-second totals
//! - Reporting windows: local-midnight day and ISO-week boundaries

pub mod duration;
pub mod project;
pub mod session;
pub mod window;

pub use duration::format_seconds;
pub use project::{Project, ProjectTotal};
pub use session::Session;
