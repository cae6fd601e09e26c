//! Task CLI commands

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Subcommand;

use super::output::Output;
use crate::domain::{CourseId, Task, TaskDuration, TaskId};
use crate::planner::NewTask;

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task to the backlog
    Add {
        /// Task title
        title: String,

        /// Course this task belongs to
        #[arg(long, short = 'c')]
        course: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,

        /// Priority score, higher is more urgent
        #[arg(long, short = 'p', default_value = "0")]
        priority: i32,

        /// Estimated duration (H:MM or H:MM:SS)
        #[arg(long, default_value = "0:00")]
        duration: TaskDuration,
    },

    /// List tasks in the order they were created
    List {
        /// Show only unscheduled tasks, most urgent first
        #[arg(long)]
        backlog: bool,
    },

    /// Show task details
    Show {
        /// Task ID
        id: String,
    },

    /// Change a task's fields
    Update {
        /// Task ID
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New course
        #[arg(long, short = 'c')]
        course: Option<String>,

        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,

        /// New priority score
        #[arg(long, short = 'p')]
        priority: Option<i32>,

        /// New estimated duration (H:MM or H:MM:SS)
        #[arg(long)]
        duration: Option<TaskDuration>,
    },

    /// Mark a task as completed
    Done {
        /// Task ID
        id: String,
    },

    /// Delete a task and renumber the ones created after it
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(cmd: TaskCommands, output: &Output, state_path: &Path) -> Result<()> {
    match cmd {
        TaskCommands::Add {
            title,
            course,
            due,
            priority,
            duration,
        } => add_task(output, state_path, &title, course.as_deref(), due, priority, duration),
        TaskCommands::List { backlog } => list_tasks(output, state_path, backlog),
        TaskCommands::Show { id } => show_task(output, state_path, &id),
        TaskCommands::Update {
            id,
            title,
            course,
            due,
            priority,
            duration,
        } => update_task(output, state_path, &id, title, course.as_deref(), due, priority, duration),
        TaskCommands::Done { id } => complete_task(output, state_path, &id),
        TaskCommands::Delete { id } => delete_task(output, state_path, &id),
    }
}

fn add_task(
    output: &Output,
    state_path: &Path,
    title: &str,
    course: Option<&str>,
    due: Option<NaiveDate>,
    priority: i32,
    duration: TaskDuration,
) -> Result<()> {
    let mut planner = super::load_planner(state_path)?;

    let course = match course {
        Some(raw) => Some(raw.parse::<CourseId>()?),
        None => None,
    };

    let id = planner.create_task(NewTask {
        title: title.to_string(),
        course,
        due_date: due,
        priority,
        estimated: duration,
    })?;
    super::save_planner(&planner, state_path)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id.to_string(),
            "title": title,
            "priority": priority,
        }));
    } else {
        output.success(&format!("Created task: {} - {}", id, title));
    }

    Ok(())
}

fn list_tasks(output: &Output, state_path: &Path, backlog: bool) -> Result<()> {
    let planner = super::load_planner(state_path)?;

    let tasks = if backlog {
        planner.backlog_order()
    } else {
        planner.upcoming_tasks()
    };

    if output.is_json() {
        let items: Vec<_> = tasks.iter().map(|t| task_json(t)).collect();
        output.data(&items);
    } else if tasks.is_empty() {
        if backlog {
            println!("No unscheduled tasks");
        } else {
            println!("No tasks");
        }
    } else {
        println!(
            "{:<6} {:<12} {:<12} {:>8} {:>9} {:<6} TITLE",
            "ID", "STATUS", "DUE", "PRIORITY", "DURATION", "COURSE"
        );
        println!("{}", "-".repeat(72));

        for task in tasks {
            let due = task
                .due_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string());
            let course = task
                .course
                .as_ref()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "{:<6} {:<12} {:<12} {:>8} {:>9} {:<6} {}",
                task.id.to_string(),
                task.status.label(),
                due,
                task.priority,
                task.estimated.to_string(),
                course,
                task.title
            );
        }
    }

    Ok(())
}

fn show_task(output: &Output, state_path: &Path, id_str: &str) -> Result<()> {
    let planner = super::load_planner(state_path)?;

    let id: TaskId = id_str.parse()?;
    let task = planner
        .task(&id)
        .ok_or_else(|| anyhow::anyhow!("Task not found: {}", id))?;

    if output.is_json() {
        output.data(&task_json(task));
    } else {
        println!("Task: {}", task.id);
        println!("Title: {}", task.title);
        println!("Status: {}", task.status.label());
        if let Some(course_id) = &task.course {
            match planner.course(course_id) {
                Some(course) => println!("Course: {} - {}", course.id, course.title),
                None => println!("Course: {}", course_id),
            }
        }
        if let Some(due) = task.due_date {
            println!("Due: {}", due);
        }
        println!("Priority: {}", task.priority);
        println!("Estimated: {}", task.estimated);
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn update_task(
    output: &Output,
    state_path: &Path,
    id_str: &str,
    title: Option<String>,
    course: Option<&str>,
    due: Option<NaiveDate>,
    priority: Option<i32>,
    duration: Option<TaskDuration>,
) -> Result<()> {
    let mut planner = super::load_planner(state_path)?;

    let id: TaskId = id_str.parse()?;
    let mut task = planner
        .task(&id)
        .ok_or_else(|| anyhow::anyhow!("Task not found: {}", id))?
        .clone();

    if let Some(title) = title {
        task.title = title;
    }
    if let Some(course) = course {
        task.course = Some(course.parse::<CourseId>()?);
    }
    if let Some(due) = due {
        task.due_date = Some(due);
    }
    if let Some(priority) = priority {
        task.priority = priority;
    }
    if let Some(duration) = duration {
        task.estimated = duration;
    }

    planner.update_task(task)?;
    super::save_planner(&planner, state_path)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id.to_string(),
        }));
    } else {
        output.success(&format!("Updated task: {}", id));
    }

    Ok(())
}

fn complete_task(output: &Output, state_path: &Path, id_str: &str) -> Result<()> {
    let mut planner = super::load_planner(state_path)?;

    let id: TaskId = id_str.parse()?;
    if !planner.mark_task_complete(&id) {
        anyhow::bail!("Task not found: {}", id);
    }
    // completed work has no place in the session queue
    planner.remove_from_today(&id);
    super::save_planner(&planner, state_path)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id.to_string(),
            "completed": true,
        }));
    } else {
        output.success(&format!("Completed task: {}", id));
    }

    Ok(())
}

fn delete_task(output: &Output, state_path: &Path, id_str: &str) -> Result<()> {
    let mut planner = super::load_planner(state_path)?;

    let id: TaskId = id_str.parse()?;
    if !planner.delete_task(&id) {
        anyhow::bail!("Task not found: {}", id);
    }
    super::save_planner(&planner, state_path)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "deleted": id.to_string(),
        }));
    } else {
        output.success(&format!("Deleted task: {}", id));
    }

    Ok(())
}

fn task_json(task: &Task) -> serde_json::Value {
    serde_json::json!({
        "id": task.id.to_string(),
        "title": task.title,
        "status": task.status,
        "course": task.course.as_ref().map(|c| c.to_string()),
        "due": task.due_date,
        "priority": task.priority,
        "duration": task.estimated.to_string(),
    })
}
