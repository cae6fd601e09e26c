//! CLI integration tests for studyplan
//!
//! These tests drive the binary end to end against a throwaway state file,
//! ensuring commands compose across invocations.

use std::fs;
use std::path::{Path, PathBuf};

use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command instance for the studyplan binary, pointed at a state file
fn studyplan_cmd(state: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("studyplan"));
    cmd.arg("--file").arg(state);
    cmd
}

/// Create a temp dir and a state file path inside it
fn temp_state() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("studyplan.json");
    (dir, state)
}

/// Add a course and assert success
fn add_course(state: &Path, title: &str) {
    studyplan_cmd(state)
        .args(["course", "add", title])
        .assert()
        .success();
}

/// Add a task with extra flags and assert success
fn add_task(state: &Path, title: &str, extra: &[&str]) {
    let mut cmd = studyplan_cmd(state);
    cmd.args(["task", "add", title]);
    cmd.args(extra);
    cmd.assert().success();
}

/// Run a command and parse its stdout as JSON
fn json_output(state: &Path, args: &[&str]) -> serde_json::Value {
    let output = studyplan_cmd(state).args(args).assert().success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();
    serde_json::from_str(&stdout).unwrap()
}

// =============================================================================
// Course Tests
// =============================================================================

#[test]
fn test_course_add_assigns_sequential_ids() {
    let (_dir, state) = temp_state();

    studyplan_cmd(&state)
        .args(["course", "add", "Algorithms"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created course: C1 - Algorithms"));

    studyplan_cmd(&state)
        .args(["course", "add", "Databases"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created course: C2 - Databases"));
}

#[test]
fn test_course_list_shows_courses() {
    let (_dir, state) = temp_state();
    add_course(&state, "Algorithms");
    add_course(&state, "Databases");

    studyplan_cmd(&state)
        .args(["course", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Algorithms"))
        .stdout(predicate::str::contains("Databases"));
}

#[test]
fn test_course_show_displays_details() {
    let (_dir, state) = temp_state();

    studyplan_cmd(&state)
        .args(["course", "add", "Algorithms", "-d", "Sorting and graphs"])
        .assert()
        .success();

    studyplan_cmd(&state)
        .args(["course", "show", "C1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Algorithms"))
        .stdout(predicate::str::contains("Sorting and graphs"));
}

#[test]
fn test_course_update_changes_title() {
    let (_dir, state) = temp_state();
    add_course(&state, "Algorithms");

    studyplan_cmd(&state)
        .args(["course", "update", "C1", "Advanced Algorithms"])
        .assert()
        .success();

    studyplan_cmd(&state)
        .args(["course", "show", "C1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Advanced Algorithms"));
}

#[test]
fn test_course_prereq_rejects_cycle() {
    let (_dir, state) = temp_state();
    add_course(&state, "Algorithms");
    add_course(&state, "Databases");

    // Databases requires Algorithms
    studyplan_cmd(&state)
        .args(["course", "prereq", "C2", "C1"])
        .assert()
        .success();

    // the reverse edge would close a 2-cycle
    studyplan_cmd(&state)
        .args(["course", "prereq", "C1", "C2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cycle"));

    // the rejected edge must not have stuck
    let shown = json_output(&state, &["course", "show", "C1", "--format", "json"]);
    assert_eq!(shown["prerequisites"].as_array().unwrap().len(), 0);
}

#[test]
fn test_course_unprereq_drops_edge() {
    let (_dir, state) = temp_state();
    add_course(&state, "Algorithms");
    add_course(&state, "Databases");

    studyplan_cmd(&state)
        .args(["course", "prereq", "C2", "C1"])
        .assert()
        .success();

    let shown = json_output(&state, &["course", "show", "C2", "--format", "json"]);
    assert_eq!(shown["prerequisites"][0], "C1");

    studyplan_cmd(&state)
        .args(["course", "unprereq", "C2", "C1"])
        .assert()
        .success();

    let shown = json_output(&state, &["course", "show", "C2", "--format", "json"]);
    assert_eq!(shown["prerequisites"].as_array().unwrap().len(), 0);
}

#[test]
fn test_course_delete_renumbers() {
    let (_dir, state) = temp_state();
    add_course(&state, "One");
    add_course(&state, "Two");
    add_course(&state, "Three");

    studyplan_cmd(&state)
        .args(["course", "delete", "C2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted course: C2"));

    // C3 slid down into the gap
    let courses = json_output(&state, &["course", "list", "--format", "json"]);
    let ids: Vec<_> = courses
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["C1", "C2"]);

    studyplan_cmd(&state)
        .args(["course", "show", "C2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Three"));

    // the allocator follows the new count
    studyplan_cmd(&state)
        .args(["course", "add", "Four"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created course: C3 - Four"));
}

#[test]
fn test_course_delete_rewrites_task_refs() {
    let (_dir, state) = temp_state();
    add_course(&state, "One");
    add_course(&state, "Two");
    add_course(&state, "Three");
    add_task(&state, "Belongs to Three", &["--course", "C3"]);

    studyplan_cmd(&state)
        .args(["course", "delete", "C2"])
        .assert()
        .success();

    let shown = json_output(&state, &["task", "show", "T1", "--format", "json"]);
    assert_eq!(shown["course"], "C2");
}

#[test]
fn test_course_numbering_restarts_when_catalog_empties() {
    let (_dir, state) = temp_state();
    add_course(&state, "One");

    studyplan_cmd(&state)
        .args(["course", "delete", "C1"])
        .assert()
        .success();

    studyplan_cmd(&state)
        .args(["course", "add", "Two"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created course: C1 - Two"));
}

#[test]
fn test_course_order_respects_prerequisites() {
    let (_dir, state) = temp_state();
    add_course(&state, "Algorithms");
    add_course(&state, "Databases");

    studyplan_cmd(&state)
        .args(["course", "prereq", "C2", "C1"])
        .assert()
        .success();

    let order = json_output(&state, &["course", "order", "--format", "json"]);
    let ids: Vec<_> = order
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_str().unwrap().to_string())
        .collect();

    let pos1 = ids.iter().position(|id| id == "C1").unwrap();
    let pos2 = ids.iter().position(|id| id == "C2").unwrap();
    assert!(pos1 < pos2, "prerequisite must come first: {:?}", ids);
}

#[test]
fn test_course_not_found_error() {
    let (_dir, state) = temp_state();

    studyplan_cmd(&state)
        .args(["course", "show", "C9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Course not found: C9"));
}

// =============================================================================
// Task Tests
// =============================================================================

#[test]
fn test_task_add_creates_task() {
    let (_dir, state) = temp_state();

    studyplan_cmd(&state)
        .args(["task", "add", "Write essay"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created task: T1 - Write essay"));
}

#[test]
fn test_task_add_unknown_course_fails_without_burning_an_id() {
    let (_dir, state) = temp_state();

    studyplan_cmd(&state)
        .args(["task", "add", "Refers to nothing", "--course", "C9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown course: C9"));

    // the failed add must not have consumed T1
    studyplan_cmd(&state)
        .args(["task", "add", "Valid"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created task: T1 - Valid"));
}

#[test]
fn test_task_add_rejects_bad_duration() {
    let (_dir, state) = temp_state();

    studyplan_cmd(&state)
        .args(["task", "add", "Essay", "--duration", "banana"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn test_task_list_shows_tasks_in_creation_order() {
    let (_dir, state) = temp_state();
    add_task(&state, "First", &["--priority", "1"]);
    add_task(&state, "Second", &["--priority", "9"]);

    let tasks = json_output(&state, &["task", "list", "--format", "json"]);
    let titles: Vec<_> = tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap().to_string())
        .collect();

    // creation order, not priority order
    assert_eq!(titles, vec!["First", "Second"]);
}

#[test]
fn test_task_list_backlog_orders_by_urgency() {
    let (_dir, state) = temp_state();
    add_task(
        &state,
        "T1",
        &["--priority", "5", "--due", "2025-09-10", "--duration", "0:10"],
    );
    add_task(
        &state,
        "T2",
        &["--priority", "9", "--due", "2025-09-10", "--duration", "0:10"],
    );
    add_task(
        &state,
        "T3",
        &["--priority", "1", "--due", "2025-09-05", "--duration", "0:05"],
    );

    let tasks = json_output(&state, &["task", "list", "--backlog", "--format", "json"]);
    let titles: Vec<_> = tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap().to_string())
        .collect();

    // earliest due date wins, then higher priority
    assert_eq!(titles, vec!["T3", "T2", "T1"]);
}

#[test]
fn test_task_update_changes_fields() {
    let (_dir, state) = temp_state();
    add_task(&state, "Essay", &[]);

    studyplan_cmd(&state)
        .args(["task", "update", "T1", "--priority", "9", "--due", "2025-12-01"])
        .assert()
        .success();

    let shown = json_output(&state, &["task", "show", "T1", "--format", "json"]);
    assert_eq!(shown["priority"], 9);
    assert_eq!(shown["due"], "2025-12-01");
}

#[test]
fn test_task_delete_renumbers() {
    let (_dir, state) = temp_state();
    add_task(&state, "A", &[]);
    add_task(&state, "B", &[]);
    add_task(&state, "C", &[]);

    studyplan_cmd(&state)
        .args(["task", "delete", "T1"])
        .assert()
        .success();

    let tasks = json_output(&state, &["task", "list", "--format", "json"]);
    let rows: Vec<_> = tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|t| {
            (
                t["id"].as_str().unwrap().to_string(),
                t["title"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        rows,
        vec![
            ("T1".to_string(), "B".to_string()),
            ("T2".to_string(), "C".to_string()),
        ]
    );

    // the allocator follows the new count
    studyplan_cmd(&state)
        .args(["task", "add", "D"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created task: T3 - D"));
}

#[test]
fn test_task_done_marks_complete() {
    let (_dir, state) = temp_state();
    add_task(&state, "Essay", &[]);

    studyplan_cmd(&state)
        .args(["task", "done", "T1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed task: T1"));

    let shown = json_output(&state, &["task", "show", "T1", "--format", "json"]);
    assert_eq!(shown["status"], "completed");
}

#[test]
fn test_task_not_found_error() {
    let (_dir, state) = temp_state();

    studyplan_cmd(&state)
        .args(["task", "show", "T9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task not found: T9"));
}

// =============================================================================
// Today Queue Tests
// =============================================================================

#[test]
fn test_today_pick_and_next() {
    let (_dir, state) = temp_state();
    add_task(&state, "First", &[]);
    add_task(&state, "Second", &[]);

    studyplan_cmd(&state)
        .args(["today", "pick", "T1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Scheduled for today: T1"));

    studyplan_cmd(&state)
        .args(["today", "pick", "T2"])
        .assert()
        .success();

    studyplan_cmd(&state)
        .args(["today", "next"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Next up: T1 - First"));

    // peek semantics: the front does not move
    studyplan_cmd(&state)
        .args(["today", "next"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Next up: T1 - First"));
}

#[test]
fn test_today_next_marks_in_progress() {
    let (_dir, state) = temp_state();
    add_task(&state, "Essay", &[]);

    studyplan_cmd(&state)
        .args(["today", "pick", "T1"])
        .assert()
        .success();

    let next = json_output(&state, &["today", "next", "--format", "json"]);
    assert_eq!(next["status"], "in_progress");
}

#[test]
fn test_today_next_empty_queue() {
    let (_dir, state) = temp_state();

    studyplan_cmd(&state)
        .args(["today", "next"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks left for today"));
}

#[test]
fn test_today_pick_removes_task_from_backlog() {
    let (_dir, state) = temp_state();
    add_task(&state, "Scheduled", &[]);
    add_task(&state, "Waiting", &[]);

    studyplan_cmd(&state)
        .args(["today", "pick", "T1"])
        .assert()
        .success();

    let backlog = json_output(&state, &["task", "list", "--backlog", "--format", "json"]);
    let titles: Vec<_> = backlog
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Waiting"]);
}

#[test]
fn test_task_done_clears_today_queue() {
    let (_dir, state) = temp_state();
    add_task(&state, "Essay", &[]);

    studyplan_cmd(&state)
        .args(["today", "pick", "T1"])
        .assert()
        .success();

    studyplan_cmd(&state)
        .args(["task", "done", "T1"])
        .assert()
        .success();

    studyplan_cmd(&state)
        .args(["today", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing scheduled for today"));
}

#[test]
fn test_today_promote_moves_to_front() {
    let (_dir, state) = temp_state();
    add_task(&state, "First", &[]);
    add_task(&state, "Second", &[]);

    studyplan_cmd(&state)
        .args(["today", "pick", "T1"])
        .assert()
        .success();
    studyplan_cmd(&state)
        .args(["today", "pick", "T2"])
        .assert()
        .success();

    studyplan_cmd(&state)
        .args(["today", "promote", "T2"])
        .assert()
        .success();

    studyplan_cmd(&state)
        .args(["today", "next"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Next up: T2 - Second"));
}

#[test]
fn test_today_pick_unknown_task_fails() {
    let (_dir, state) = temp_state();

    studyplan_cmd(&state)
        .args(["today", "pick", "T9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task not found: T9"));
}

#[test]
fn test_today_promote_requires_queued_task() {
    let (_dir, state) = temp_state();
    add_task(&state, "Unqueued", &[]);

    studyplan_cmd(&state)
        .args(["today", "promote", "T1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not on today's queue"));
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_state_file_has_expected_shape() {
    let (_dir, state) = temp_state();
    add_course(&state, "Algorithms");
    add_task(&state, "Essay", &["--course", "C1"]);

    let content = fs::read_to_string(&state).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();

    assert!(json["courses"].is_array());
    assert!(json["tasks"].is_array());
    assert!(json["todaysQueue"].is_array());
    assert!(json["counters"].is_object());
    assert_eq!(json["tasks"][0]["courseId"], "C1");
}

#[test]
fn test_state_survives_between_invocations() {
    let (_dir, state) = temp_state();
    add_course(&state, "Algorithms");
    add_task(&state, "Essay", &[]);

    studyplan_cmd(&state)
        .args(["today", "pick", "T1"])
        .assert()
        .success();

    // a fresh invocation sees the queue exactly as it was left
    studyplan_cmd(&state)
        .args(["today", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Essay"));

    studyplan_cmd(&state)
        .args(["task", "add", "Next one"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created task: T2"));
}

#[test]
fn test_json_format_flag() {
    let (_dir, state) = temp_state();

    let created = json_output(&state, &["course", "add", "Algorithms", "--format", "json"]);
    assert_eq!(created["id"], "C1");

    let courses = json_output(&state, &["course", "list", "--format", "json"]);
    assert_eq!(courses.as_array().unwrap().len(), 1);
}
