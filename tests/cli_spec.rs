//! End-to-end tests for the `dtrack` binary.
//!
//! Every test runs in its own temp directory with the database, log file and
//! output directories pointed inside it through `TASKMANAGER_*` variables.

use std::fs;
use std::path::Path;

use predicates::prelude::*;
use tempfile::TempDir;

fn dtrack(dir: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("dtrack"));
    cmd.current_dir(dir)
        .env("TASKMANAGER_DATABASE_PATH", dir.join("data").join("tracker.db"))
        .env("TASKMANAGER_LOG_FILE_PATH", dir.join("dtrack.log"))
        .env("TASKMANAGER_REPORTS_DIR", dir.join("reports"))
        .env("TASKMANAGER_SUGGESTIONS_DIR", dir.join("suggestions"))
        .env_remove("TASKMANAGER_AI__API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

fn run(dir: &Path, args: &[&str]) {
    dtrack(dir).args(args).assert().success();
}

// =============================================================================
// Entities
// =============================================================================

#[test]
fn test_project_create_and_list() {
    let dir = TempDir::new().unwrap();

    dtrack(dir.path())
        .args(["project", "create", "--name", "Alpha", "--description", "Web"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created project 1"));

    dtrack(dir.path())
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alpha"))
        .stdout(predicate::str::contains("Web"));
}

#[test]
fn test_blank_name_is_rejected() {
    let dir = TempDir::new().unwrap();

    dtrack(dir.path())
        .args(["project", "create", "--name", " "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: name is required"));
}

#[test]
fn test_missing_row_is_reported() {
    let dir = TempDir::new().unwrap();

    dtrack(dir.path())
        .args(["task", "update", "--id", "9", "--active", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task with id 9 not found"));
}

#[test]
fn test_task_listing_resolves_project_names_and_filters() {
    let dir = TempDir::new().unwrap();
    run(dir.path(), &["project", "create", "--name", "Alpha"]);
    run(
        dir.path(),
        &["task", "create", "--project-id", "1", "--title", "Fix login", "--priority", "Alta"],
    );
    run(dir.path(), &["task", "create", "--project-id", "1", "--title", "Docs"]);
    run(dir.path(), &["task", "update", "--id", "2", "--active", "0"]);

    dtrack(dir.path())
        .args(["task", "list", "--active", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fix login"))
        .stdout(predicate::str::contains("Alpha"))
        .stdout(predicate::str::contains("Docs").not());

    dtrack(dir.path())
        .args(["task", "list", "--title", "nothing-matches"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No records found."));
}

// =============================================================================
// Reports
// =============================================================================

#[test]
fn test_report_generate_prints_and_saves() {
    let dir = TempDir::new().unwrap();
    run(dir.path(), &["project", "create", "--name", "Beta", "--has-daily", "1"]);
    run(dir.path(), &["resource", "create", "--name", "Dana"]);
    run(dir.path(), &["resource-project", "create", "--project-id", "1", "--resource-id", "1"]);
    run(
        dir.path(),
        &["daily-task", "create", "--project-id", "1", "--resource-id", "1", "--title", "Deploy"],
    );

    dtrack(dir.path())
        .args(["report", "generate", "--date", "10/03/2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Diario 10/03/2024"))
        .stdout(predicate::str::contains("#### Dana"))
        .stdout(predicate::str::contains("##### Qué hice ayer\n- Deploy\n"));

    let saved = fs::read_to_string(dir.path().join("reports").join("reporte_2024-03-10.md"))
        .expect("report file missing");
    assert!(saved.starts_with("# Diario 10/03/2024\n---\n\n## Beta\n"));
}

#[test]
fn test_report_with_bad_date_falls_back_to_today() {
    let dir = TempDir::new().unwrap();
    let today = chrono::Local::now().date_naive();

    dtrack(dir.path())
        .args(["report", "generate", "--date", "2024-03-10"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning"))
        .stdout(predicate::str::contains(format!(
            "# Diario {}",
            today.format("%d/%m/%Y")
        )));

    let expected = format!("reporte_{}.md", today.format("%Y-%m-%d"));
    assert!(dir.path().join("reports").join(expected).is_file());
}

// =============================================================================
// Suggestions and ambient behavior
// =============================================================================

#[test]
fn test_suggest_without_work_skips_the_api() {
    let dir = TempDir::new().unwrap();

    dtrack(dir.path())
        .arg("suggest")
        .assert()
        .success()
        .stdout(predicate::str::contains("No active work to analyze."));
}

#[test]
fn test_suggest_without_key_fails() {
    let dir = TempDir::new().unwrap();
    run(dir.path(), &["project", "create", "--name", "Alpha"]);
    run(dir.path(), &["task", "create", "--project-id", "1", "--title", "Ship"]);

    dtrack(dir.path())
        .args(["suggest", "--save"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key is not configured"));

    assert!(!dir.path().join("suggestions").exists());
}

#[test]
fn test_config_file_flag_overrides_environment() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("custom.toml"), "reports_dir = \"elsewhere\"\n").unwrap();

    dtrack(dir.path())
        .args(["report", "generate", "--date", "01/02/2024", "--config", "custom.toml"])
        .assert()
        .success();

    assert!(dir.path().join("elsewhere").join("reporte_2024-02-01.md").is_file());
}

#[test]
fn test_missing_config_file_fails_early() {
    let dir = TempDir::new().unwrap();

    dtrack(dir.path())
        .args(["project", "list", "--config", "absent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_commands_are_logged_to_file() {
    let dir = TempDir::new().unwrap();
    run(dir.path(), &["project", "list"]);

    let log = fs::read_to_string(dir.path().join("dtrack.log")).expect("log file missing");
    assert!(log.contains("Starting command"));
    assert!(log.contains("project"));
}
