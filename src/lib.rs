//! studyplan - A console study planner
//!
//! Courses form a prerequisite graph, tasks wait in a due-date/priority
//! backlog, and a FIFO queue holds the work picked for the current session.
//! State lives in a single JSON file.

pub mod domain;
pub mod planner;
pub mod storage;
pub mod cli;

pub use domain::{Course, CourseId, Task, TaskDuration, TaskId, TaskStatus};
pub use planner::{NewTask, Planner, PlannerError, Snapshot};
