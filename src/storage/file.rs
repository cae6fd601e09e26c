//! JSON state file
//!
//! The whole planner state lives in one JSON document. Saves write to a
//! temp file first and land with an atomic rename, so a crash mid-write
//! leaves the previous state intact.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::planner::Snapshot;

/// Store for the planner state in a single JSON file
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    /// Creates a state file handle at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the state file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot; a missing file means an empty plan
    pub fn load(&self) -> Result<Snapshot> {
        if !self.path.exists() {
            return Ok(Snapshot::default());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read state file: {}", self.path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse state file: {}", self.path.display()))
    }

    /// Writes the snapshot (full rewrite)
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        // Write to temp file first
        let temp_path = self.path.with_extension("json.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            let mut writer = BufWriter::new(&file);
            serde_json::to_writer_pretty(&mut writer, snapshot)
                .context("Failed to serialize state")?;
            writer.flush().context("Failed to flush state file")?;
        }

        // Atomic rename
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_as_empty_snapshot() {
        let dir = TempDir::new().unwrap();
        let store = StateFile::new(dir.path().join("planner.json"));

        let snapshot = store.load().unwrap();
        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = StateFile::new(dir.path().join("planner.json"));

        let snapshot = Snapshot {
            todays_queue: vec!["T1".to_string()],
            counters: std::collections::HashMap::from([("T".to_string(), 1)]),
            ..Snapshot::default()
        };

        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap(), snapshot);
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = StateFile::new(dir.path().join("nested").join("deep").join("planner.json"));

        store.save(&Snapshot::default()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let dir = TempDir::new().unwrap();
        let store = StateFile::new(dir.path().join("planner.json"));
        store.save(&Snapshot::default()).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec!["planner.json"]);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("planner.json");
        fs::write(&path, "not json at all").unwrap();

        let store = StateFile::new(path);
        assert!(store.load().is_err());
    }
}
