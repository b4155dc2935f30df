//! CLI integration tests for planmark
//!
//! These tests drive the binary end to end: outline files in, stored plans
//! edited, outline or JSON back out.

use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const OUTLINE: &str = "\
# Release 1.0
Ship the first public build

## Docs
- Write the guide
  - progress: 40%
  - note: waiting on screenshots
- Publish
  - progress: 100%
";

/// Get a command instance for the planmark binary
fn planmark_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("planmark"))
}

/// Create a temporary directory and initialize a planmark project
fn setup_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    planmark_cmd().arg("init").arg(dir.path()).assert().success();
    dir
}

/// Project with OUTLINE imported
fn imported_project() -> TempDir {
    let dir = setup_project();
    fs::write(dir.path().join("plan.md"), OUTLINE).unwrap();
    planmark_cmd()
        .current_dir(dir.path())
        .args(["import", "plan.md"])
        .assert()
        .success();
    dir
}

fn stored(dir: &Path) -> serde_json::Value {
    let output = planmark_cmd()
        .current_dir(dir)
        .args(["list", "--format", "json"])
        .assert()
        .success();
    serde_json::from_slice(&output.get_output().stdout).unwrap()
}

// =============================================================================
// Initialization Tests
// =============================================================================

#[test]
fn test_init_creates_structure() {
    let dir = TempDir::new().unwrap();

    planmark_cmd()
        .arg("init")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized planmark project"));

    assert!(dir.path().join(".planmark").is_dir());
    assert!(dir.path().join(".planmark/config.toml").is_file());
    assert!(dir.path().join(".planmark/topics.jsonl").is_file());
}

#[test]
fn test_init_is_idempotent() {
    let dir = imported_project();

    planmark_cmd().arg("init").arg(dir.path()).assert().success();

    assert_eq!(stored(dir.path()).as_array().unwrap().len(), 1);
}

// =============================================================================
// Validate / Convert Tests (no project needed)
// =============================================================================

#[test]
fn test_validate_clean_outline() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("plan.md"), OUTLINE).unwrap();

    planmark_cmd()
        .current_dir(dir.path())
        .args(["validate", "plan.md", "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok"));
}

#[test]
fn test_validate_reports_findings() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("plan.md"), "## Orphan task\n- item\n").unwrap();

    planmark_cmd()
        .current_dir(dir.path())
        .args(["validate", "plan.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("line 1"))
        .stdout(predicate::str::contains("is not inside any topic"));

    planmark_cmd()
        .current_dir(dir.path())
        .args(["validate", "plan.md", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("structural issues"));
}

#[test]
fn test_validate_json_format() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("plan.md"), "just prose\n").unwrap();

    let output = planmark_cmd()
        .current_dir(dir.path())
        .args(["validate", "plan.md", "--format", "json"])
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json["valid"], false);
    let kinds: Vec<_> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["kind"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(kinds, ["missing_topic", "missing_task", "missing_todo"]);
}

#[test]
fn test_convert_outline_to_json_stdout() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("plan.md"), OUTLINE).unwrap();

    let output = planmark_cmd()
        .current_dir(dir.path())
        .args(["convert", "plan.md"])
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    let topic = &json[0];
    assert_eq!(topic["name"], "Release 1.0");
    assert_eq!(topic["description"], "Ship the first public build");

    let todos = topic["tasks"][0]["todos"].as_array().unwrap();
    assert_eq!(todos.len(), 2);
    assert_eq!(todos[0]["progress"], 40);
    assert_eq!(todos[0]["note"], "waiting on screenshots");
    assert_eq!(todos[0]["completed"], false);
    assert_eq!(todos[1]["completed"], true);
    assert!(todos[0]["createdAt"].is_string());
}

#[test]
fn test_convert_round_trip_through_files() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("plan.md"), OUTLINE).unwrap();

    planmark_cmd()
        .current_dir(dir.path())
        .args(["convert", "plan.md", "--output", "out/plan.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 topic(s), 1 task(s), 2 todo(s)"));

    let output = planmark_cmd()
        .current_dir(dir.path())
        .args(["convert", "out/plan.json"])
        .assert()
        .success();

    let text = String::from_utf8_lossy(&output.get_output().stdout).to_string();
    assert_eq!(
        text,
        "# Release 1.0\n\
         Ship the first public build\n\
         \n\
         ## Docs\n\
         \n\
         - Write the guide\n  \
         - progress: 40%\n  \
         - note: waiting on screenshots\n\
         - Publish\n  \
         - progress: 100%\n"
    );
}

#[test]
fn test_convert_warns_but_repairs() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("loose.txt"), "- stray todo\n").unwrap();

    let output = planmark_cmd()
        .current_dir(dir.path())
        .args(["convert", "loose.txt", "--to", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning:"));

    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json[0]["name"], "Default Topic");
    assert_eq!(json[0]["tasks"][0]["name"], "Default Task");
    assert_eq!(json[0]["tasks"][0]["todos"][0]["title"], "stray todo");
}

#[test]
fn test_convert_uses_project_default_names() {
    let dir = setup_project();
    fs::write(
        dir.path().join(".planmark/config.toml"),
        "[outline]\ndefault_topic_name = \"Inbox\"\n",
    )
    .unwrap();
    fs::write(dir.path().join("loose.md"), "## Loose task\n").unwrap();

    planmark_cmd()
        .current_dir(dir.path())
        .args(["convert", "loose.md", "--to", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Inbox\""));
}

#[test]
fn test_convert_missing_file() {
    let dir = TempDir::new().unwrap();

    planmark_cmd()
        .current_dir(dir.path())
        .args(["convert", "nope.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

// =============================================================================
// Import / Export Tests
// =============================================================================

#[test]
fn test_import_and_export_outline() {
    let dir = imported_project();

    planmark_cmd()
        .current_dir(dir.path())
        .args(["export"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Release 1.0\n"))
        .stdout(predicate::str::contains("  - note: waiting on screenshots"));
}

#[test]
fn test_import_appends_by_default() {
    let dir = imported_project();

    planmark_cmd()
        .current_dir(dir.path())
        .args(["import", "plan.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 topic(s)"));

    assert_eq!(stored(dir.path()).as_array().unwrap().len(), 2);
}

#[test]
fn test_import_replace() {
    let dir = imported_project();
    fs::write(dir.path().join("other.md"), "# Other\n## Work\n- one\n").unwrap();

    planmark_cmd()
        .current_dir(dir.path())
        .args(["import", "other.md", "--replace"])
        .assert()
        .success();

    let topics = stored(dir.path());
    assert_eq!(topics.as_array().unwrap().len(), 1);
    assert_eq!(topics[0]["name"], "Other");
}

#[test]
fn test_import_rejects_invalid_outline() {
    let dir = setup_project();
    fs::write(dir.path().join("loose.md"), "- orphan\n").unwrap();

    planmark_cmd()
        .current_dir(dir.path())
        .args(["import", "loose.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    assert!(stored(dir.path()).as_array().unwrap().is_empty());

    planmark_cmd()
        .current_dir(dir.path())
        .args(["import", "loose.md", "--force"])
        .assert()
        .success();

    assert_eq!(stored(dir.path())[0]["tasks"][0]["todos"][0]["title"], "orphan");
}

#[test]
fn test_import_json_backup() {
    let dir = setup_project();
    fs::write(
        dir.path().join("backup.json"),
        r#"{"topics":[{"id":"1700000000000abc","name":"Restored","tasks":[]}]}"#,
    )
    .unwrap();

    planmark_cmd()
        .current_dir(dir.path())
        .args(["import", "backup.json"])
        .assert()
        .success();

    let topics = stored(dir.path());
    assert_eq!(topics[0]["id"], "1700000000000abc");
    assert_eq!(topics[0]["name"], "Restored");
}

const BACKUP_JSON: &str = r#"[{"id":"t1","name":"Saved","tasks":[
    {"id":"k1","name":"Work","todos":[{"id":"d1","title":"First","progress":20}]}
]}]"#;

fn all_ids(topics: &serde_json::Value) -> Vec<String> {
    let mut ids = Vec::new();
    for topic in topics.as_array().unwrap() {
        ids.push(topic["id"].as_str().unwrap().to_string());
        for task in topic["tasks"].as_array().unwrap() {
            ids.push(task["id"].as_str().unwrap().to_string());
            for todo in task["todos"].as_array().unwrap() {
                ids.push(todo["id"].as_str().unwrap().to_string());
            }
        }
    }
    ids
}

#[test]
fn test_import_same_json_twice_keeps_ids_unique() {
    let dir = setup_project();
    fs::write(dir.path().join("plan.json"), BACKUP_JSON).unwrap();

    for _ in 0..2 {
        planmark_cmd()
            .current_dir(dir.path())
            .args(["import", "plan.json"])
            .assert()
            .success();
    }

    let topics = stored(dir.path());
    let mut ids = all_ids(&topics);
    assert_eq!(ids.len(), 6);
    assert_eq!(ids.iter().filter(|id| *id == "d1").count(), 1);
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 6);

    planmark_cmd()
        .current_dir(dir.path())
        .args(["todo", "done", "d1"])
        .assert()
        .success();

    let topics = stored(dir.path());
    assert_eq!(topics[0]["tasks"][0]["todos"][0]["completed"], true);
    assert_eq!(topics[1]["tasks"][0]["todos"][0]["completed"], false);
    assert_eq!(topics[1]["tasks"][0]["todos"][0]["title"], "First");
}

#[test]
fn test_import_json_rejects_out_of_range_progress() {
    let dir = setup_project();
    fs::write(
        dir.path().join("plan.json"),
        r#"[{"id":"t1","name":"T","tasks":[{"id":"k1","name":"K","todos":[{"id":"d1","title":"x","progress":150}]}]}]"#,
    )
    .unwrap();

    planmark_cmd()
        .current_dir(dir.path())
        .args(["import", "plan.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 0-100, got 150"));

    assert!(stored(dir.path()).as_array().unwrap().is_empty());
}

#[test]
fn test_export_to_file_picks_format_from_extension() {
    let dir = imported_project();

    planmark_cmd()
        .current_dir(dir.path())
        .args(["export", "--output", "backup/plan.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 topic(s)"));

    let content = fs::read_to_string(dir.path().join("backup/plan.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json[0]["name"], "Release 1.0");
}

// =============================================================================
// Edit Command Tests
// =============================================================================

#[test]
fn test_add_topic_task_and_todo() {
    let dir = setup_project();

    let output = planmark_cmd()
        .current_dir(dir.path())
        .args(["topic", "add", "Backlog", "--format", "json"])
        .assert()
        .success();
    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    let topic_id = json["id"].as_str().unwrap().to_string();

    let output = planmark_cmd()
        .current_dir(dir.path())
        .args(["task", "add", &topic_id, "Triage", "--format", "json"])
        .assert()
        .success();
    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    let task_id = json["id"].as_str().unwrap().to_string();

    planmark_cmd()
        .current_dir(dir.path())
        .args(["todo", "add", &task_id, "Sort issues", "--note", "by label"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created todo"));

    planmark_cmd()
        .current_dir(dir.path())
        .args(["export"])
        .assert()
        .success()
        .stdout("# Backlog\n\n## Triage\n\n- Sort issues\n  - progress: 0%\n  - note: by label\n");
}

#[test]
fn test_todo_progress_done_and_reopen() {
    let dir = imported_project();
    let todo_id = stored(dir.path())[0]["tasks"][0]["todos"][0]["id"]
        .as_str()
        .unwrap()
        .to_string();

    planmark_cmd()
        .current_dir(dir.path())
        .args(["todo", "progress", &todo_id, "75"])
        .assert()
        .success()
        .stdout(predicate::str::contains("75%"));

    planmark_cmd()
        .current_dir(dir.path())
        .args(["todo", "done", &todo_id])
        .assert()
        .success();

    let todo = stored(dir.path())[0]["tasks"][0]["todos"][0].clone();
    assert_eq!(todo["progress"], 75);
    assert_eq!(todo["completed"], true);

    planmark_cmd()
        .current_dir(dir.path())
        .args(["todo", "reopen", &todo_id])
        .assert()
        .success();
    assert_eq!(stored(dir.path())[0]["tasks"][0]["todos"][0]["completed"], false);
}

#[test]
fn test_todo_progress_out_of_range() {
    let dir = imported_project();
    let todo_id = stored(dir.path())[0]["tasks"][0]["todos"][0]["id"]
        .as_str()
        .unwrap()
        .to_string();

    planmark_cmd()
        .current_dir(dir.path())
        .args(["todo", "progress", &todo_id, "150"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid progress"));

    assert_eq!(stored(dir.path())[0]["tasks"][0]["todos"][0]["progress"], 40);
}

#[test]
fn test_todo_note_updates_export() {
    let dir = imported_project();
    let todo_id = stored(dir.path())[0]["tasks"][0]["todos"][1]["id"]
        .as_str()
        .unwrap()
        .to_string();

    planmark_cmd()
        .current_dir(dir.path())
        .args(["todo", "note", &todo_id, "announced"])
        .assert()
        .success();

    planmark_cmd()
        .current_dir(dir.path())
        .args(["export"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("- Publish\n  - progress: 100%\n  - note: announced\n"));
}

#[test]
fn test_remove_checks_kind() {
    let dir = imported_project();
    let topics = stored(dir.path());
    let task_id = topics[0]["tasks"][0]["id"].as_str().unwrap().to_string();

    planmark_cmd()
        .current_dir(dir.path())
        .args(["todo", "remove", &task_id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is a task, expected a todo"));

    planmark_cmd()
        .current_dir(dir.path())
        .args(["task", "remove", &task_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed task"));

    assert!(stored(dir.path())[0]["tasks"].as_array().unwrap().is_empty());
}

#[test]
fn test_unknown_id() {
    let dir = imported_project();

    planmark_cmd()
        .current_dir(dir.path())
        .args(["topic", "remove", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No topic, task or todo"));
}

// =============================================================================
// Status / Output Tests
// =============================================================================

#[test]
fn test_status_shows_overview() {
    let dir = imported_project();

    planmark_cmd()
        .current_dir(dir.path())
        .args(["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Topics: 1"))
        .stdout(predicate::str::contains("2 (1 completed, 70% average progress)"));
}

#[test]
fn test_list_tree() {
    let dir = imported_project();

    planmark_cmd()
        .current_dir(dir.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Release 1.0"))
        .stdout(predicate::str::contains("Docs (1/2)"))
        .stdout(predicate::str::contains("note: waiting on screenshots"));
}

#[test]
fn test_verbose_flag() {
    let dir = setup_project();

    let output = planmark_cmd()
        .current_dir(dir.path())
        .args(["--verbose", "status"])
        .assert()
        .success();

    let stderr = String::from_utf8_lossy(&output.get_output().stderr);
    assert!(stderr.contains("[verbose]"));
}

#[test]
fn test_not_in_project_error() {
    let dir = TempDir::new().unwrap();

    planmark_cmd()
        .current_dir(dir.path())
        .args(["status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not in a planmark project"));
}
