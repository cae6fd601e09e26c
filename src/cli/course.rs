//! Course CLI commands

use std::path::Path;

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use crate::domain::CourseId;

#[derive(Subcommand)]
pub enum CourseCommands {
    /// Add a course
    Add {
        /// Course title
        title: String,

        /// Course description
        #[arg(long, short = 'd', default_value = "")]
        description: String,
    },

    /// List courses in the order they were added
    List,

    /// Show course details
    Show {
        /// Course ID
        id: String,
    },

    /// Update a course's title and description
    Update {
        /// Course ID
        id: String,

        /// New title
        title: String,

        /// New description
        #[arg(long, short = 'd', default_value = "")]
        description: String,
    },

    /// Delete a course and renumber the ones added after it
    Delete {
        /// Course ID
        id: String,
    },

    /// Require one course before another
    Prereq {
        /// Course that gets the prerequisite
        course: String,

        /// Course that must be taken first
        requires: String,
    },

    /// Drop a prerequisite
    Unprereq {
        /// Course to relax
        course: String,

        /// Prerequisite to drop
        requires: String,
    },

    /// Print a study order that respects prerequisites
    Order,
}

pub fn run(cmd: CourseCommands, output: &Output, state_path: &Path) -> Result<()> {
    match cmd {
        CourseCommands::Add { title, description } => {
            add_course(output, state_path, &title, &description)
        }
        CourseCommands::List => list_courses(output, state_path),
        CourseCommands::Show { id } => show_course(output, state_path, &id),
        CourseCommands::Update {
            id,
            title,
            description,
        } => update_course(output, state_path, &id, &title, &description),
        CourseCommands::Delete { id } => delete_course(output, state_path, &id),
        CourseCommands::Prereq { course, requires } => {
            add_prereq(output, state_path, &course, &requires)
        }
        CourseCommands::Unprereq { course, requires } => {
            remove_prereq(output, state_path, &course, &requires)
        }
        CourseCommands::Order => show_order(output, state_path),
    }
}

fn add_course(output: &Output, state_path: &Path, title: &str, description: &str) -> Result<()> {
    let mut planner = super::load_planner(state_path)?;
    let id = planner.create_course(title, description);
    super::save_planner(&planner, state_path)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id.to_string(),
            "title": title,
        }));
    } else {
        output.success(&format!("Created course: {} - {}", id, title));
    }

    Ok(())
}

fn list_courses(output: &Output, state_path: &Path) -> Result<()> {
    let planner = super::load_planner(state_path)?;
    let courses = planner.list_courses();

    if output.is_json() {
        let items: Vec<_> = courses
            .iter()
            .map(|c| {
                serde_json::json!({
                    "id": c.id.to_string(),
                    "title": c.title,
                    "description": c.description,
                    "prerequisites": planner
                        .prerequisites(&c.id)
                        .iter()
                        .map(|p| p.id.to_string())
                        .collect::<Vec<_>>(),
                })
            })
            .collect();
        output.data(&items);
    } else if courses.is_empty() {
        println!("No courses");
    } else {
        println!("{:<6} {:<28} PREREQUISITES", "ID", "TITLE");
        println!("{}", "-".repeat(60));

        for course in courses {
            let prereqs: Vec<_> = planner
                .prerequisites(&course.id)
                .iter()
                .map(|p| p.id.to_string())
                .collect();
            let prereqs = if prereqs.is_empty() {
                "-".to_string()
            } else {
                prereqs.join(", ")
            };
            println!("{:<6} {:<28} {}", course.id.to_string(), course.title, prereqs);
        }
    }

    Ok(())
}

fn show_course(output: &Output, state_path: &Path, id_str: &str) -> Result<()> {
    let planner = super::load_planner(state_path)?;

    let id: CourseId = id_str.parse()?;
    let course = planner
        .course(&id)
        .ok_or_else(|| anyhow::anyhow!("Course not found: {}", id))?;
    let prereqs = planner.prerequisites(&id);

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": course.id.to_string(),
            "title": course.title,
            "description": course.description,
            "prerequisites": prereqs.iter().map(|p| p.id.to_string()).collect::<Vec<_>>(),
        }));
    } else {
        println!("Course: {}", course.id);
        println!("Title: {}", course.title);
        if !course.description.is_empty() {
            println!("Description: {}", course.description);
        }

        if !prereqs.is_empty() {
            println!("\nRequires first:");
            for prereq in &prereqs {
                println!("  {} {}", prereq.id, prereq.title);
            }
        }
    }

    Ok(())
}

fn update_course(
    output: &Output,
    state_path: &Path,
    id_str: &str,
    title: &str,
    description: &str,
) -> Result<()> {
    let mut planner = super::load_planner(state_path)?;

    let id: CourseId = id_str.parse()?;
    if !planner.update_course(&id, title, description) {
        anyhow::bail!("Course not found: {}", id);
    }
    super::save_planner(&planner, state_path)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id.to_string(),
            "title": title,
        }));
    } else {
        output.success(&format!("Updated course: {}", id));
    }

    Ok(())
}

fn delete_course(output: &Output, state_path: &Path, id_str: &str) -> Result<()> {
    let mut planner = super::load_planner(state_path)?;

    let id: CourseId = id_str.parse()?;
    if !planner.delete_course(&id) {
        anyhow::bail!("Course not found: {}", id);
    }
    super::save_planner(&planner, state_path)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "deleted": id.to_string(),
        }));
    } else {
        output.success(&format!("Deleted course: {}", id));
    }

    Ok(())
}

fn add_prereq(output: &Output, state_path: &Path, course_str: &str, requires_str: &str) -> Result<()> {
    let mut planner = super::load_planner(state_path)?;

    let course: CourseId = course_str.parse()?;
    let requires: CourseId = requires_str.parse()?;

    if planner.course(&course).is_none() {
        anyhow::bail!("Course not found: {}", course);
    }
    if planner.course(&requires).is_none() {
        anyhow::bail!("Course not found: {}", requires);
    }

    // Both IDs exist, so a rejection can only mean a cycle
    if !planner.add_prerequisite(&course, &requires) {
        anyhow::bail!(
            "Cannot make {} require {}: prerequisites would form a cycle",
            course,
            requires
        );
    }
    super::save_planner(&planner, state_path)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "course": course.to_string(),
            "requires": requires.to_string(),
        }));
    } else {
        output.success(&format!("{} now requires {} first", course, requires));
    }

    Ok(())
}

fn remove_prereq(
    output: &Output,
    state_path: &Path,
    course_str: &str,
    requires_str: &str,
) -> Result<()> {
    let mut planner = super::load_planner(state_path)?;

    let course: CourseId = course_str.parse()?;
    let requires: CourseId = requires_str.parse()?;

    if !planner.remove_prerequisite(&course, &requires) {
        anyhow::bail!("{} does not require {}", course, requires);
    }
    super::save_planner(&planner, state_path)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "course": course.to_string(),
            "removed": requires.to_string(),
        }));
    } else {
        output.success(&format!("{} no longer requires {}", course, requires));
    }

    Ok(())
}

fn show_order(output: &Output, state_path: &Path) -> Result<()> {
    let planner = super::load_planner(state_path)?;

    // The graph lists dependents first; a study plan reads the other way
    let mut order = planner.topological_order();
    order.reverse();

    if output.is_json() {
        let ids: Vec<_> = order.iter().map(|c| c.id.to_string()).collect();
        output.data(&ids);
    } else if order.is_empty() {
        println!("No courses");
    } else {
        println!("Suggested study order:");
        for (i, course) in order.iter().enumerate() {
            println!("{:>3}. {} {}", i + 1, course.id, course.title);
        }
    }

    Ok(())
}
