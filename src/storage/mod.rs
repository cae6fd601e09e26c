//! # Storage Layer
//!
//! Persistence layer for the study planner.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Planner state | JSON | `studyplan.json` (or `--file` / config) |
//! | Config | TOML | `./studyplan.toml`, then the user config dir |
//!
//! All state writes are atomic (temp file + rename). The state file holds a
//! full [`crate::planner::Snapshot`]; saving always rewrites the whole file.
//!
//! ## Key Types
//!
//! - [`StateFile`] - Read/write the planner snapshot as JSON
//! - [`Config`] - Optional tool configuration

mod config;
mod file;

pub use config::{Config, ConfigError};
pub use file::StateFile;
