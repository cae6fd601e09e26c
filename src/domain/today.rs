//! Today's work queue
//!
//! A FIFO of the tasks picked for the current session. Order here is the
//! order tasks were scheduled, independent of backlog urgency.

use std::collections::VecDeque;

use super::id::TaskId;

/// FIFO queue of task IDs scheduled for today
#[derive(Debug, Default)]
pub struct TodayQueue {
    queue: VecDeque<TaskId>,
}

impl TodayQueue {
    /// Creates an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a task at the back
    pub fn enqueue(&mut self, id: TaskId) {
        self.queue.push_back(id);
    }

    /// The task at the front, if any
    pub fn peek(&self) -> Option<&TaskId> {
        self.queue.front()
    }

    /// Removes and returns the front task
    pub fn dequeue(&mut self) -> Option<TaskId> {
        self.queue.pop_front()
    }

    /// Removes a task wherever it sits in the queue
    pub fn remove(&mut self, id: &TaskId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|q| q != id);
        self.queue.len() != before
    }

    /// Moves a queued task to the front
    pub fn promote(&mut self, id: &TaskId) -> bool {
        if !self.remove(id) {
            return false;
        }
        self.queue.push_front(id.clone());
        true
    }

    /// Rewrites every occurrence of a task ID
    pub fn rename(&mut self, old: &TaskId, new: &TaskId) {
        for slot in self.queue.iter_mut().filter(|q| *q == old) {
            *slot = new.clone();
        }
    }

    /// Task IDs from front to back
    pub fn iter(&self) -> impl Iterator<Item = &TaskId> {
        self.queue.iter()
    }

    /// Returns true if the task is queued
    pub fn contains(&self, id: &TaskId) -> bool {
        self.queue.contains(id)
    }

    /// Returns the number of queued tasks
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
