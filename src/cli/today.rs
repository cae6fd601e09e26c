//! Today-queue CLI commands

use std::path::Path;

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use crate::domain::TaskId;

#[derive(Subcommand)]
pub enum TodayCommands {
    /// Pull a task from the backlog onto today's queue
    Pick {
        /// Task ID
        id: String,
    },

    /// List today's queue, front to back
    List,

    /// Show the task at the front of the queue and start it
    Next,

    /// Move a queued task to the front
    Promote {
        /// Task ID
        id: String,
    },
}

pub fn run(cmd: TodayCommands, output: &Output, state_path: &Path) -> Result<()> {
    match cmd {
        TodayCommands::Pick { id } => pick_task(output, state_path, &id),
        TodayCommands::List => list_queue(output, state_path),
        TodayCommands::Next => next_task(output, state_path),
        TodayCommands::Promote { id } => promote_task(output, state_path, &id),
    }
}

fn pick_task(output: &Output, state_path: &Path, id_str: &str) -> Result<()> {
    let mut planner = super::load_planner(state_path)?;

    let id: TaskId = id_str.parse()?;
    if !planner.schedule_for_today(&id) {
        anyhow::bail!("Task not found: {}", id);
    }
    super::save_planner(&planner, state_path)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "scheduled": id.to_string(),
        }));
    } else {
        output.success(&format!("Scheduled for today: {}", id));
    }

    Ok(())
}

fn list_queue(output: &Output, state_path: &Path) -> Result<()> {
    let planner = super::load_planner(state_path)?;
    let tasks = planner.today_tasks();

    if output.is_json() {
        let items: Vec<_> = tasks
            .iter()
            .map(|t| {
                serde_json::json!({
                    "id": t.id.to_string(),
                    "title": t.title,
                    "status": t.status,
                })
            })
            .collect();
        output.data(&items);
    } else if tasks.is_empty() {
        println!("Nothing scheduled for today");
    } else {
        println!("{:<4} {:<6} {:<12} TITLE", "#", "ID", "STATUS");
        println!("{}", "-".repeat(48));

        for (i, task) in tasks.iter().enumerate() {
            println!(
                "{:<4} {:<6} {:<12} {}",
                i + 1,
                task.id.to_string(),
                task.status.label(),
                task.title
            );
        }
    }

    Ok(())
}

fn next_task(output: &Output, state_path: &Path) -> Result<()> {
    let mut planner = super::load_planner(state_path)?;

    // The in-progress mark is session state; nothing durable changes here
    match planner.next_today_task() {
        Some(task) => {
            if output.is_json() {
                output.data(&serde_json::json!({
                    "id": task.id.to_string(),
                    "title": task.title,
                    "status": task.status,
                }));
            } else {
                println!("Next up: {} - {}", task.id, task.title);
                if let Some(due) = task.due_date {
                    println!("Due: {}", due);
                }
                println!("Estimated: {}", task.estimated);
            }
        }
        None => {
            if output.is_json() {
                output.data(&serde_json::Value::Null);
            } else {
                println!("No tasks left for today");
            }
        }
    }

    Ok(())
}

fn promote_task(output: &Output, state_path: &Path, id_str: &str) -> Result<()> {
    let mut planner = super::load_planner(state_path)?;

    let id: TaskId = id_str.parse()?;
    if !planner.promote_today(&id) {
        anyhow::bail!("Task is not on today's queue: {}", id);
    }
    super::save_planner(&planner, state_path)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "promoted": id.to_string(),
        }));
    } else {
        output.success(&format!("Moved to the front of today's queue: {}", id));
    }

    Ok(())
}
