//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Course | Course catalog and prerequisites | `course add`, `course prereq`, `course order` |
//! | Task | Backlog management | `task add`, `task list`, `task done` |
//! | Today | The current session's work queue | `today pick`, `today next`, `today promote` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! studyplan --verbose task list
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod course;
mod task;
mod today;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};

use std::path::Path;

use anyhow::Result;

use crate::planner::Planner;
use crate::storage::StateFile;

/// Loads the planner from the state file, starting empty if none exists
fn load_planner(path: &Path) -> Result<Planner> {
    let snapshot = StateFile::new(path).load()?;
    Ok(Planner::restore(snapshot))
}

/// Writes the planner back to the state file
fn save_planner(planner: &Planner, path: &Path) -> Result<()> {
    StateFile::new(path).save(&planner.snapshot())
}
