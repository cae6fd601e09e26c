//! Persisted state shapes
//!
//! The planner exposes its whole state as one `Snapshot` and can be rebuilt
//! from one. The storage layer moves snapshots to and from disk without
//! knowing anything else about the planner; field names here are the wire
//! format.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{
    Course, CourseId, Task, TaskId, TaskStatus, COURSE_PREFIX, TASK_PREFIX,
};

use super::Planner;

/// One persisted course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl From<&Course> for CourseRecord {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.to_string(),
            title: course.title.clone(),
            description: course.description.clone(),
        }
    }
}

/// One persisted task
///
/// Only completion survives a reload; the in-progress mark is session
/// state and is deliberately not written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub priority_score: i32,
    pub estimated_duration: String,
    #[serde(default)]
    pub completed: bool,
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.to_string(),
            title: task.title.clone(),
            course_id: task.course.as_ref().map(|c| c.to_string()),
            due_date: task.due_date,
            priority_score: task.priority,
            estimated_duration: task.estimated.to_string(),
            completed: task.is_complete(),
        }
    }
}

/// The whole persisted planner state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub courses: Vec<CourseRecord>,
    pub tasks: Vec<TaskRecord>,
    pub todays_queue: Vec<String>,
    pub counters: HashMap<String, u32>,
}

impl Planner {
    /// The full planner state in persisted shapes
    ///
    /// Courses come out in insertion order, tasks in creation order and the
    /// queue front to back, so saving twice in a row writes identical data.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            courses: self.list_courses().into_iter().map(CourseRecord::from).collect(),
            tasks: self.upcoming_tasks().into_iter().map(TaskRecord::from).collect(),
            todays_queue: self.today.iter().map(|id| id.to_string()).collect(),
            counters: self.ids.counters(),
        }
    }

    /// Rebuilds a planner from persisted state
    ///
    /// Counters load first so fresh allocations continue from them; they
    /// are then advanced past the highest canonical ID actually present.
    /// A task ID not of the form `T{n}` is replaced with a fresh one
    /// rather than failing the load, a course reference naming no loaded
    /// course is dropped, and so is a queue entry resolving to no task.
    pub fn restore(snapshot: Snapshot) -> Self {
        let mut planner = Planner::new();
        planner.ids.load(snapshot.counters);

        for record in snapshot.courses {
            let id: CourseId = match record.id.parse() {
                Ok(id) => id,
                Err(_) => continue,
            };
            if let Some(seq) = id.seq() {
                if seq.prefix() == COURSE_PREFIX {
                    planner.ids.advance_to(COURSE_PREFIX, seq.sequence());
                }
            }
            planner
                .courses
                .add_course(Course::new(id, record.title, record.description));
        }

        let mut max_task_seq = 0;
        for record in snapshot.tasks {
            let parsed = record
                .id
                .parse::<TaskId>()
                .ok()
                .filter(|id| id.is_canonical());
            let id = match parsed {
                Some(id) => {
                    if let Some(seq) = id.seq() {
                        max_task_seq = max_task_seq.max(seq.sequence());
                    }
                    id
                }
                None => TaskId::from(planner.ids.next(TASK_PREFIX)),
            };

            let mut task = Task::new(id, record.title);
            task.course = record
                .course_id
                .and_then(|c| c.parse::<CourseId>().ok())
                .filter(|c| planner.courses.contains(c));
            task.due_date = record.due_date;
            task.priority = record.priority_score;
            task.estimated = record.estimated_duration.parse().unwrap_or_default();
            task.status = if record.completed {
                TaskStatus::Completed
            } else {
                TaskStatus::NotStarted
            };

            planner.insert_task(task);
        }
        planner.ids.advance_to(TASK_PREFIX, max_task_seq);

        for raw in snapshot.todays_queue {
            let id: TaskId = match raw.parse() {
                Ok(id) => id,
                Err(_) => continue,
            };
            if planner.tasks.contains_key(&id) && !planner.today.contains(&id) {
                // a queued task is not also waiting in the backlog
                planner.backlog.remove(&id);
                planner.today.enqueue(id);
            }
        }

        planner
    }
}
