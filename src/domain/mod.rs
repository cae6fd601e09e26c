//! Domain models for the study planner
//!
//! Contains the core scheduling logic without any I/O concerns.

mod backlog;
mod course;
mod graph;
mod id;
mod task;
mod today;

pub use backlog::Backlog;
pub use course::Course;
pub use graph::CourseGraph;
pub use id::{CourseId, IdAllocator, IdError, SeqId, TaskId, COURSE_PREFIX, TASK_PREFIX};
pub use task::{DurationError, Task, TaskDuration, TaskStatus};
pub use today::TodayQueue;
