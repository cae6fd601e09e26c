//! Priority-ordered task backlog
//!
//! Holds the IDs of tasks not yet scheduled for today, ordered by urgency:
//! earlier due date first, then higher priority score, then shorter
//! estimated duration. Task records themselves live in the planner's store;
//! the backlog keeps only IDs plus the key fields they sort by.

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use super::id::TaskId;
use super::task::{Task, TaskDuration};

/// Due-date component of the ordering key
///
/// Dated tasks sort by date; a task without a due date sorts after every
/// dated one. The variant order encodes that policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum DueDateKey {
    On(NaiveDate),
    Undated,
}

impl From<Option<NaiveDate>> for DueDateKey {
    fn from(due: Option<NaiveDate>) -> Self {
        match due {
            Some(date) => DueDateKey::On(date),
            None => DueDateKey::Undated,
        }
    }
}

/// Full ordering key for one backlog entry
///
/// The trailing task ID keeps entries with identical urgency distinct, so
/// two tasks can never collapse into one set slot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    due: DueDateKey,
    priority: Reverse<i32>,
    estimated: TaskDuration,
    id: TaskId,
}

impl Entry {
    fn for_task(task: &Task) -> Self {
        Self {
            due: DueDateKey::from(task.due_date),
            priority: Reverse(task.priority),
            estimated: task.estimated,
            id: task.id.clone(),
        }
    }
}

/// The not-yet-scheduled portion of the plan, in urgency order
#[derive(Debug, Default)]
pub struct Backlog {
    /// Entries in comparator order
    entries: BTreeSet<Entry>,

    /// Map from task ID to its current entry, for removal by ID
    index: HashMap<TaskId, Entry>,
}

impl Backlog {
    /// Creates an empty backlog
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a task, or repositions it if already present
    ///
    /// Ordering fields are captured at insert time, so a task edit must be
    /// followed by a re-insert to take effect.
    pub fn insert(&mut self, task: &Task) {
        self.remove(&task.id);
        let entry = Entry::for_task(task);
        self.index.insert(task.id.clone(), entry.clone());
        self.entries.insert(entry);
    }

    /// Removes a task by ID
    pub fn remove(&mut self, id: &TaskId) -> bool {
        match self.index.remove(id) {
            Some(entry) => self.entries.remove(&entry),
            None => false,
        }
    }

    /// The most urgent task, if any
    pub fn peek(&self) -> Option<&TaskId> {
        self.entries.first().map(|e| &e.id)
    }

    /// Removes and returns the most urgent task
    pub fn pop(&mut self) -> Option<TaskId> {
        let entry = self.entries.pop_first()?;
        self.index.remove(&entry.id);
        Some(entry.id)
    }

    /// Rewrites a task's ID without disturbing its position
    pub fn rename(&mut self, old: &TaskId, new: TaskId) -> bool {
        let entry = match self.index.remove(old) {
            Some(entry) => entry,
            None => return false,
        };
        self.entries.remove(&entry);

        let renamed = Entry {
            id: new.clone(),
            ..entry
        };
        self.index.insert(new, renamed.clone());
        self.entries.insert(renamed);
        true
    }

    /// Task IDs in urgency order
    pub fn iter(&self) -> impl Iterator<Item = &TaskId> {
        self.entries.iter().map(|e| &e.id)
    }

    /// Returns true if the task is in the backlog
    pub fn contains(&self, id: &TaskId) -> bool {
        self.index.contains_key(id)
    }

    /// Returns the number of tasks held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is waiting
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
