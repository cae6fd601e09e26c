//! Sequential ID system for courses and tasks
//!
//! ID Format:
//! - Course IDs: `C{n}` (e.g., `C1`, `C2`)
//! - Task IDs: `T{n}` (e.g., `T1`, `T2`)
//!
//! Sequence numbers start at 1 and stay contiguous per prefix: deleting an
//! entity renumbers every higher-numbered sibling down by one. The allocator
//! counters travel with the persisted state so numbering survives restarts.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Prefix for course IDs
pub const COURSE_PREFIX: &str = "C";

/// Prefix for task IDs
pub const TASK_PREFIX: &str = "T";

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("ID must not be empty")]
    Empty,

    #[error("Invalid sequential ID: expected '{{prefix}}{{number}}', got '{0}'")]
    InvalidSeqId(String),
}

/// A parsed sequential ID: an alphabetic prefix plus a positive sequence
/// number with no leading zeros.
///
/// Renumbering and counter synchronization work on this parsed form instead
/// of scanning raw ID strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeqId {
    prefix: String,
    sequence: u32,
}

impl SeqId {
    pub fn new(prefix: impl Into<String>, sequence: u32) -> Self {
        Self {
            prefix: prefix.into(),
            sequence,
        }
    }

    /// Returns the alphabetic prefix (e.g., `C` or `T`)
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the numeric sequence portion
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// The same ID one sequence number lower, used when closing the gap
    /// left by a deleted entity
    pub fn shifted_down(&self) -> SeqId {
        Self {
            prefix: self.prefix.clone(),
            sequence: self.sequence.saturating_sub(1),
        }
    }
}

impl fmt::Display for SeqId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.sequence)
    }
}

impl FromStr for SeqId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits_at = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| IdError::InvalidSeqId(s.to_string()))?;

        let (prefix, digits) = s.split_at(digits_at);
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(IdError::InvalidSeqId(s.to_string()));
        }
        if digits.starts_with('0') || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(IdError::InvalidSeqId(s.to_string()));
        }

        let sequence = digits
            .parse::<u32>()
            .map_err(|_| IdError::InvalidSeqId(s.to_string()))?;

        Ok(Self::new(prefix, sequence))
    }
}

/// Course ID - canonically `C{n}`, but any non-empty string is accepted so
/// externally produced data still loads
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseId(String);

impl CourseId {
    /// Returns the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the sequential form, if this ID has one
    pub fn seq(&self) -> Option<SeqId> {
        self.0.parse().ok()
    }

    /// Returns true for IDs in the canonical `C{n}` form
    pub fn is_canonical(&self) -> bool {
        self.seq().map(|s| s.prefix() == COURSE_PREFIX).unwrap_or(false)
    }
}

impl From<SeqId> for CourseId {
    fn from(seq: SeqId) -> Self {
        Self(seq.to_string())
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CourseId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for CourseId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CourseId> for String {
    fn from(id: CourseId) -> Self {
        id.0
    }
}

/// Task ID - canonically `T{n}`, but any non-empty string is accepted.
/// Non-canonical IDs are replaced with fresh ones when state is reloaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(String);

impl TaskId {
    /// Returns the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the sequential form, if this ID has one
    pub fn seq(&self) -> Option<SeqId> {
        self.0.parse().ok()
    }

    /// Returns true for IDs in the canonical `T{n}` form
    pub fn is_canonical(&self) -> bool {
        self.seq().map(|s| s.prefix() == TASK_PREFIX).unwrap_or(false)
    }
}

impl From<SeqId> for TaskId {
    fn from(seq: SeqId) -> Self {
        Self(seq.to_string())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for TaskId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

/// Allocates sequential IDs, one counter per prefix.
///
/// The counter records the last number handed out. Counters are exported
/// into the persisted snapshot and restored from it, so numbering continues
/// where it left off.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdAllocator {
    counters: HashMap<String, u32>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next ID for a prefix
    pub fn next(&mut self, prefix: &str) -> SeqId {
        let counter = self.counters.entry(prefix.to_string()).or_insert(0);
        *counter += 1;
        SeqId::new(prefix, *counter)
    }

    /// Returns the last number allocated for a prefix (0 if none)
    pub fn last(&self, prefix: &str) -> u32 {
        self.counters.get(prefix).copied().unwrap_or(0)
    }

    /// Sets a prefix counter to an exact value
    pub fn set(&mut self, prefix: &str, value: u32) {
        self.counters.insert(prefix.to_string(), value);
    }

    /// Raises a prefix counter so it is at least `value`
    pub fn advance_to(&mut self, prefix: &str, value: u32) {
        let counter = self.counters.entry(prefix.to_string()).or_insert(0);
        if *counter < value {
            *counter = value;
        }
    }

    /// All counters, keyed by prefix, for persistence
    pub fn counters(&self) -> HashMap<String, u32> {
        self.counters.clone()
    }

    /// Replaces all counters with a persisted set
    pub fn load(&mut self, counters: HashMap<String, u32>) {
        self.counters = counters;
    }
}
