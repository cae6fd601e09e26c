//! Task domain model
//!
//! Tasks are the units of study work. Each one may belong to a course and
//! carries the three fields the backlog orders by: due date, priority score
//! and estimated duration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::id::{CourseId, TaskId};

/// Status of a task
///
/// Transitions only move forward: `NotStarted -> InProgress -> Completed`.
/// There is no way out of `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Returns true if this status represents completion
    pub fn is_complete(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }

    /// Returns true if this task is not yet started
    pub fn is_pending(&self) -> bool {
        matches!(self, TaskStatus::NotStarted)
    }

    /// Returns true if this task is currently being worked on
    pub fn is_active(&self) -> bool {
        matches!(self, TaskStatus::InProgress)
    }

    /// Returns a display label for the status
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "not started",
            TaskStatus::InProgress => "in progress",
            TaskStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum DurationError {
    #[error("Invalid duration '{0}': expected 'H:MM' or 'H:MM:SS'")]
    Invalid(String),
}

/// Estimated task duration with minute precision
///
/// Displays as `HH:MM:SS` with zero seconds, which is also the persisted
/// form. Parsing accepts `H:MM` and `H:MM:SS`; seconds are discarded and
/// totals past `u32::MAX` minutes are rejected.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct TaskDuration {
    minutes: u32,
}

impl TaskDuration {
    pub fn new(hours: u32, minutes: u32) -> Self {
        Self {
            minutes: hours * 60 + minutes,
        }
    }

    pub fn from_minutes(minutes: u32) -> Self {
        Self { minutes }
    }

    /// Whole hours portion
    pub fn hours_part(&self) -> u32 {
        self.minutes / 60
    }

    /// Minutes past the hour (0..60)
    pub fn minutes_part(&self) -> u32 {
        self.minutes % 60
    }

    /// Total length in minutes
    pub fn total_minutes(&self) -> u32 {
        self.minutes
    }
}

impl fmt::Display for TaskDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:00", self.hours_part(), self.minutes_part())
    }
}

impl FromStr for TaskDuration {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(DurationError::Invalid(s.to_string()));
        }

        let hours: u32 = parts[0]
            .parse()
            .map_err(|_| DurationError::Invalid(s.to_string()))?;
        let minutes: u32 = parts[1]
            .parse()
            .map_err(|_| DurationError::Invalid(s.to_string()))?;
        if minutes >= 60 {
            return Err(DurationError::Invalid(s.to_string()));
        }

        if let Some(seconds) = parts.get(2) {
            let seconds: u32 = seconds
                .parse()
                .map_err(|_| DurationError::Invalid(s.to_string()))?;
            if seconds >= 60 {
                return Err(DurationError::Invalid(s.to_string()));
            }
        }

        let total = hours
            .checked_mul(60)
            .and_then(|m| m.checked_add(minutes))
            .ok_or_else(|| DurationError::Invalid(s.to_string()))?;
        Ok(Self::from_minutes(total))
    }
}

impl TryFrom<String> for TaskDuration {
    type Error = DurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaskDuration> for String {
    fn from(d: TaskDuration) -> Self {
        d.to_string()
    }
}

/// A study task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,

    /// Human-readable title
    pub title: String,

    /// Course this task belongs to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<CourseId>,

    /// When the task is due; tasks without one sort after every dated task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// Priority score; higher is more urgent
    pub priority: i32,

    /// Estimated time to finish
    pub estimated: TaskDuration,

    /// Current status
    #[serde(default)]
    pub status: TaskStatus,
}

impl Task {
    /// Creates a new task with the given ID and title
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            course: None,
            due_date: None,
            priority: 0,
            estimated: TaskDuration::default(),
            status: TaskStatus::NotStarted,
        }
    }

    /// Sets the course (builder style)
    pub fn with_course(mut self, course: CourseId) -> Self {
        self.course = Some(course);
        self
    }

    /// Sets the due date (builder style)
    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Sets the priority score (builder style)
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the estimated duration (builder style)
    pub fn with_estimated(mut self, estimated: TaskDuration) -> Self {
        self.estimated = estimated;
        self
    }

    /// Transitions to in-progress status
    pub fn start(&mut self) {
        if self.status == TaskStatus::NotStarted {
            self.status = TaskStatus::InProgress;
        }
    }

    /// Transitions to completed status
    pub fn complete(&mut self) {
        self.status = TaskStatus::Completed;
    }

    /// Returns true if the task is completed
    pub fn is_complete(&self) -> bool {
        self.status.is_complete()
    }
}
