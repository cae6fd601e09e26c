//! Scheduling service
//!
//! `Planner` composes the course graph, the task store, the urgency-ordered
//! backlog and today's queue, and owns the ID allocator. Multi-entity
//! updates (shift-delete plus reference rewriting) happen inside a single
//! call so the pieces never disagree.

mod snapshot;

pub use snapshot::{CourseRecord, Snapshot, TaskRecord};

use std::collections::HashMap;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{
    Backlog, Course, CourseGraph, CourseId, IdAllocator, SeqId, Task, TaskDuration, TaskId,
    TodayQueue, COURSE_PREFIX, TASK_PREFIX,
};

#[derive(Debug, Error, PartialEq)]
pub enum PlannerError {
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("Unknown course: {0}")]
    UnknownCourse(CourseId),
}

/// Fields for a task the planner has not assigned an ID to yet
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub course: Option<CourseId>,
    pub due_date: Option<NaiveDate>,
    pub priority: i32,
    pub estimated: TaskDuration,
}

/// The scheduling service
///
/// All course and task mutation goes through here; the graph, store,
/// backlog and queue are never exposed mutably.
#[derive(Debug, Default)]
pub struct Planner {
    /// Courses and their prerequisite edges
    courses: CourseGraph,

    /// Task records keyed by ID
    tasks: HashMap<TaskId, Task>,

    /// Task IDs in creation order; drives listing and renumbering
    ledger: Vec<TaskId>,

    /// Not-yet-scheduled tasks in urgency order
    backlog: Backlog,

    /// FIFO of tasks picked for the current session
    today: TodayQueue,

    /// Sequential ID counters for courses and tasks
    ids: IdAllocator,
}

impl Planner {
    /// Creates an empty planner
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a course with the next sequential ID and returns it
    pub fn create_course(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> CourseId {
        let id = CourseId::from(self.ids.next(COURSE_PREFIX));
        self.courses
            .add_course(Course::new(id.clone(), title, description));
        id
    }

    /// Adds a course under its own ID
    ///
    /// Returns false on a duplicate ID, leaving the existing course alone.
    pub fn add_course(&mut self, course: Course) -> bool {
        self.courses.add_course(course)
    }

    /// Updates a course's title and description; prerequisites are kept
    pub fn update_course(
        &mut self,
        id: &CourseId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> bool {
        self.courses.update_course(id, title, description)
    }

    /// Deletes a course and renumbers the ones added after it
    ///
    /// Tasks pointing at the deleted course lose their reference; tasks
    /// pointing at a renumbered course follow it to its new ID. Both
    /// rewrites happen before this call returns. The allocator follows the
    /// highest remaining course number, so the next create closes the gap
    /// and an emptied catalog restarts numbering at 1.
    pub fn delete_course(&mut self, id: &CourseId) -> bool {
        if !self.courses.contains(id) {
            return false;
        }

        for task in self.tasks.values_mut() {
            if task.course.as_ref() == Some(id) {
                task.course = None;
            }
        }

        let mapping: HashMap<CourseId, CourseId> = self
            .courses
            .remove_course_and_shift(id)
            .into_iter()
            .collect();

        if !mapping.is_empty() {
            for task in self.tasks.values_mut() {
                if let Some(new) = task.course.as_ref().and_then(|c| mapping.get(c)) {
                    task.course = Some(new.clone());
                }
            }
        }

        // Same discipline as tasks: the counter lands on the highest
        // sequential ID still in use, zero when the catalog emptied
        let high_water = self
            .courses
            .list_all()
            .iter()
            .filter_map(|c| c.id.seq())
            .filter(|seq| seq.prefix() == COURSE_PREFIX)
            .map(|seq| seq.sequence())
            .max()
            .unwrap_or(0);
        self.ids.set(COURSE_PREFIX, high_water);

        true
    }

    /// Looks up a course by ID
    pub fn course(&self, id: &CourseId) -> Option<&Course> {
        self.courses.course(id)
    }

    /// All courses in the order they were added
    pub fn list_courses(&self) -> Vec<&Course> {
        self.courses.list_all()
    }

    /// All courses with every course before its prerequisites
    pub fn topological_order(&self) -> Vec<&Course> {
        self.courses.topological_order()
    }

    /// Records that `course` requires `prereq` first
    ///
    /// Returns false for unknown IDs or when the edge would create a
    /// prerequisite cycle; the graph is unchanged in both cases.
    pub fn add_prerequisite(&mut self, course: &CourseId, prereq: &CourseId) -> bool {
        self.courses.add_prerequisite(course, prereq)
    }

    /// Drops a prerequisite requirement
    pub fn remove_prerequisite(&mut self, course: &CourseId, prereq: &CourseId) -> bool {
        self.courses.remove_prerequisite(course, prereq)
    }

    /// Direct prerequisites of a course
    pub fn prerequisites(&self, id: &CourseId) -> Vec<&Course> {
        self.courses.prerequisites(id)
    }

    /// Returns true if the prerequisite relation contains a cycle
    pub fn has_cycle(&self) -> bool {
        self.courses.has_cycle()
    }

    /// Creates a task with the next sequential ID and returns it
    ///
    /// The course reference, when present, must name an existing course;
    /// validation happens before an ID is allocated so a rejected create
    /// burns no sequence number.
    pub fn create_task(&mut self, new: NewTask) -> Result<TaskId, PlannerError> {
        self.check_course_ref(new.course.as_ref())?;

        let id = TaskId::from(self.ids.next(TASK_PREFIX));
        let mut task = Task::new(id.clone(), new.title)
            .with_priority(new.priority)
            .with_estimated(new.estimated);
        task.course = new.course;
        task.due_date = new.due_date;

        self.insert_task(task);
        Ok(id)
    }

    /// Adds a task under its own ID
    ///
    /// Re-adding an existing ID replaces the stored record without
    /// duplicating its ledger entry.
    pub fn add_task(&mut self, task: Task) -> Result<(), PlannerError> {
        self.check_course_ref(task.course.as_ref())?;
        self.insert_task(task);
        Ok(())
    }

    /// Replaces a stored task record
    ///
    /// The task re-enters the backlog under its new ordering fields, even
    /// if it had been scheduled for today.
    pub fn update_task(&mut self, task: Task) -> Result<(), PlannerError> {
        if !self.tasks.contains_key(&task.id) {
            return Err(PlannerError::TaskNotFound(task.id.clone()));
        }
        self.check_course_ref(task.course.as_ref())?;

        self.backlog.insert(&task);
        self.tasks.insert(task.id.clone(), task);
        Ok(())
    }

    /// Deletes a task and closes the numbering gap it leaves
    ///
    /// The task disappears from the store, the backlog and today's queue.
    /// Every task with a higher sequence number then moves down one, in the
    /// store, the ledger, the backlog and today's queue alike, and the
    /// allocator follows the highest remaining task number. Deleting a task
    /// whose ID is outside the sequential scheme shifts nothing.
    pub fn delete_task(&mut self, id: &TaskId) -> bool {
        let pos = match self.ledger.iter().position(|t| t == id) {
            Some(pos) => pos,
            None => return false,
        };
        let victim = id.seq();

        self.ledger.remove(pos);
        self.tasks.remove(id);
        self.backlog.remove(id);
        self.today.remove(id);

        if let Some(victim) = victim {
            // Ascending order, so each rename lands in a just-vacated slot
            let mut to_rename: Vec<SeqId> = self
                .ledger
                .iter()
                .filter_map(|t| t.seq())
                .filter(|seq| {
                    seq.prefix() == victim.prefix() && seq.sequence() > victim.sequence()
                })
                .collect();
            to_rename.sort_by_key(|seq| seq.sequence());

            for seq in to_rename {
                let old = TaskId::from(seq.clone());
                let new = TaskId::from(seq.shifted_down());

                if let Some(mut task) = self.tasks.remove(&old) {
                    task.id = new.clone();
                    self.tasks.insert(new.clone(), task);
                }
                self.backlog.rename(&old, new.clone());
                self.today.rename(&old, &new);
                if let Some(slot) = self.ledger.iter_mut().find(|t| **t == old) {
                    *slot = new;
                }
            }
        }

        // Counter lands on the highest sequential ID still in use, which
        // for contiguous numbering is exactly the remaining count
        let high_water = self
            .ledger
            .iter()
            .filter_map(|t| t.seq())
            .filter(|seq| seq.prefix() == TASK_PREFIX)
            .map(|seq| seq.sequence())
            .max()
            .unwrap_or(0);
        self.ids.set(TASK_PREFIX, high_water);
        true
    }

    /// Looks up a task by ID
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// All tasks in creation order
    ///
    /// Listing deliberately follows the ledger, not urgency; the ordered
    /// view is `backlog_order`.
    pub fn upcoming_tasks(&self) -> Vec<&Task> {
        self.ledger.iter().filter_map(|id| self.tasks.get(id)).collect()
    }

    /// Unscheduled tasks in urgency order
    pub fn backlog_order(&self) -> Vec<&Task> {
        self.backlog
            .iter()
            .filter_map(|id| self.tasks.get(id))
            .collect()
    }

    /// Moves a task out of the backlog onto the back of today's queue
    ///
    /// Scheduling an already-queued task is a successful no-op.
    pub fn schedule_for_today(&mut self, id: &TaskId) -> bool {
        if !self.tasks.contains_key(id) {
            return false;
        }
        if self.today.contains(id) {
            return true;
        }

        self.backlog.remove(id);
        self.today.enqueue(id.clone());
        true
    }

    /// The task at the front of today's queue, marked in progress
    ///
    /// Peeks rather than dequeues: calling twice returns the same task.
    /// The in-progress mark is the only side effect, and only a task that
    /// has not been started changes status.
    pub fn next_today_task(&mut self) -> Option<&Task> {
        let id = self.today.peek()?.clone();
        if let Some(task) = self.tasks.get_mut(&id) {
            task.start();
        }
        self.tasks.get(&id)
    }

    /// Sets a task's completion flag
    ///
    /// The task stays wherever it is queued; removal from today's queue is
    /// a separate call.
    pub fn mark_task_complete(&mut self, id: &TaskId) -> bool {
        match self.tasks.get_mut(id) {
            Some(task) => {
                task.complete();
                true
            }
            None => false,
        }
    }

    /// Takes a task off today's queue (any position)
    pub fn remove_from_today(&mut self, id: &TaskId) -> bool {
        self.today.remove(id)
    }

    /// Moves a queued task to the front of today's queue
    pub fn promote_today(&mut self, id: &TaskId) -> bool {
        self.today.promote(id)
    }

    /// Tasks in today's queue, front to back
    pub fn today_tasks(&self) -> Vec<&Task> {
        self.today
            .iter()
            .filter_map(|id| self.tasks.get(id))
            .collect()
    }

    fn check_course_ref(&self, course: Option<&CourseId>) -> Result<(), PlannerError> {
        match course {
            Some(id) if !self.courses.contains(id) => {
                Err(PlannerError::UnknownCourse(id.clone()))
            }
            _ => Ok(()),
        }
    }

    /// Store + backlog + ledger, in one place
    fn insert_task(&mut self, task: Task) {
        let id = task.id.clone();
        self.backlog.insert(&task);
        self.tasks.insert(id.clone(), task);
        if !self.ledger.contains(&id) {
            self.ledger.push(id);
        }
    }
}
