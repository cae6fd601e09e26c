//! Configuration handling
//!
//! Configuration is read from `studyplan.toml` in the working directory,
//! falling back to the per-user config directory. Both files are optional;
//! absent files mean defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Tool configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// State file used when neither `--file` nor `STUDYPLAN_FILE` is set
    pub default_file: Option<PathBuf>,
}

impl Config {
    pub const FILE_NAME: &'static str = "studyplan.toml";

    /// Loads the nearest configuration: working directory first, then the
    /// per-user config directory
    pub fn load() -> Result<Self> {
        let local = PathBuf::from(Self::FILE_NAME);
        if local.is_file() {
            return Self::load_from(&local);
        }

        if let Some(dir) = Self::user_config_dir() {
            let global = dir.join(Self::FILE_NAME);
            if global.is_file() {
                return Self::load_from(&global);
            }
        }

        Ok(Self::default())
    }

    /// Loads configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Returns the per-user config directory
    pub fn user_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "studyplan", "studyplan")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Resolves the state file path: explicit override, then the configured
    /// default, then `studyplan.json` in the working directory
    pub fn state_file(&self, override_path: Option<PathBuf>) -> PathBuf {
        override_path
            .or_else(|| self.default_file.clone())
            .unwrap_or_else(|| PathBuf::from("studyplan.json"))
    }
}
