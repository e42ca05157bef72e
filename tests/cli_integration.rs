//! CLI integration tests for todo
//!
//! Each test runs the binary in a fresh temporary directory with its own
//! config home, so no user configuration leaks in.

use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Get a command instance for the todo binary, isolated in `dir`
fn todo_cmd(dir: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("todo"));
    cmd.current_dir(dir)
        .env_remove("TODO_CONFIG")
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd
}

/// Writes a script into `dir` and returns its path
fn write_script(dir: &Path, lines: &[&str]) -> std::path::PathBuf {
    let path = dir.join("session.todo");
    fs::write(&path, lines.join("\n")).unwrap();
    path
}

// =============================================================================
// Script Tests
// =============================================================================

#[test]
fn test_run_script_add_and_list() {
    let dir = TempDir::new().unwrap();
    let script = write_script(
        dir.path(),
        &[
            "# groceries",
            r#"add "Buy milk" -p high"#,
            r#"add "Walk dog""#,
            "",
            "list",
        ],
    );

    todo_cmd(dir.path())
        .arg("run")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created item #1: Buy milk"))
        .stdout(predicate::str::contains("Created item #2: Walk dog"))
        .stdout(predicate::str::contains("High"));
}

#[test]
fn test_run_script_stops_on_first_error() {
    let dir = TempDir::new().unwrap();
    let script = write_script(dir.path(), &["add First", "done 42", "add Never"]);

    todo_cmd(dir.path())
        .arg("run")
        .arg(&script)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Created item #1"))
        .stdout(predicate::str::contains("Never").not())
        .stderr(predicate::str::contains("line 2"))
        .stderr(predicate::str::contains("Item not found: #42"));
}

#[test]
fn test_run_missing_script_fails() {
    let dir = TempDir::new().unwrap();

    todo_cmd(dir.path())
        .arg("run")
        .arg("nope.todo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open script"));
}

#[test]
fn test_empty_title_is_rejected() {
    let dir = TempDir::new().unwrap();

    todo_cmd(dir.path())
        .args(["exec", r#"add "   ""#])
        .assert()
        .failure()
        .stderr(predicate::str::contains("title"));
}

// =============================================================================
// Shell Tests
// =============================================================================

#[test]
fn test_shell_reads_stdin_and_continues_after_errors() {
    let dir = TempDir::new().unwrap();

    todo_cmd(dir.path())
        .arg("shell")
        .write_stdin("add Report\ndone 9\ndone 1\nlist --completed\nexit\nadd Ignored\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed item #1"))
        .stdout(predicate::str::contains("Report"))
        .stdout(predicate::str::contains("Ignored").not())
        .stderr(predicate::str::contains("Item not found: #9"));
}

#[test]
fn test_shell_reports_unknown_commands() {
    let dir = TempDir::new().unwrap();

    todo_cmd(dir.path())
        .arg("shell")
        .write_stdin("frobnicate\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("frobnicate"));
}

// =============================================================================
// Query Tests
// =============================================================================

#[test]
fn test_within_rejects_negative_days() {
    let dir = TempDir::new().unwrap();

    todo_cmd(dir.path())
        .args(["exec", "within -1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("days"));
}

#[test]
fn test_urgent_and_sorted_views() {
    let dir = TempDir::new().unwrap();

    todo_cmd(dir.path())
        .args([
            "--format",
            "json",
            "exec",
            "add Low -p low",
            "add Fire -p critical",
            "add Meh",
            "urgent",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""title":"Fire""#))
        .stdout(predicate::str::contains(r#""priority":"critical""#));
}

#[test]
fn test_due_dates_and_today() {
    let dir = TempDir::new().unwrap();

    todo_cmd(dir.path())
        .args([
            "exec",
            "add Taxes --due today",
            "add Later --due +30",
            "add Whenever",
            "today",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Taxes"))
        .stdout(predicate::str::contains("Later").count(1));
}

#[test]
fn test_past_due_date_is_rejected() {
    let dir = TempDir::new().unwrap();

    todo_cmd(dir.path())
        .args(["exec", "add Old --due 2001-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Due date cannot be in the past"));
}

#[test]
fn test_search_matches_description() {
    let dir = TempDir::new().unwrap();

    todo_cmd(dir.path())
        .args([
            "exec",
            "add Groceries -d 'milk and eggs'",
            "add Gym",
            "search MILK",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("Gym").count(1));
}

// =============================================================================
// Category Tests
// =============================================================================

#[test]
fn test_duplicate_category_is_a_conflict() {
    let dir = TempDir::new().unwrap();

    todo_cmd(dir.path())
        .args(["exec", "category add Work", "category add WORK"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_removing_category_detaches_items() {
    let dir = TempDir::new().unwrap();

    todo_cmd(dir.path())
        .args([
            "--format",
            "json",
            "exec",
            "category add Work --color #00ff00",
            "add Report -c work",
            "category remove Work",
            "show 1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r##""color":"#00ff00""##))
        .stdout(predicate::str::contains(r#""category":null"#));
}

#[test]
fn test_category_default_color_from_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".todo.toml"),
        "default_color = \"#123456\"\n",
    )
    .unwrap();

    todo_cmd(dir.path())
        .args(["--format", "json", "exec", "category add Home", "category list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r##""color":"#123456""##));
}

// =============================================================================
// Statistics Tests
// =============================================================================

#[test]
fn test_stats_text() {
    let dir = TempDir::new().unwrap();

    todo_cmd(dir.path())
        .args(["exec", "add One", "add Two -p high", "done 1", "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Items: 2 total"))
        .stdout(predicate::str::contains("Completion rate: 50%"));
}

#[test]
fn test_stats_json_breakdowns() {
    let dir = TempDir::new().unwrap();

    todo_cmd(dir.path())
        .args([
            "--format",
            "json",
            "exec",
            "category add Work",
            "add One -c Work --due tomorrow",
            "add Two",
            "stats --days 3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""total_items":2"#))
        .stdout(predicate::str::contains(r#""Uncategorized":1"#))
        .stdout(predicate::str::contains(r#""Work":1"#))
        .stdout(predicate::str::contains(r#""critical":0"#));
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_explicit_config_must_exist() {
    let dir = TempDir::new().unwrap();

    todo_cmd(dir.path())
        .args(["--config", "missing.toml", "exec", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_invalid_project_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".todo.toml"), "upcoming_days = -1\n").unwrap();

    todo_cmd(dir.path())
        .args(["exec", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("upcoming_days"));
}

#[test]
fn test_oversized_stats_window_is_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".todo.toml"), "upcoming_days = 100000\n").unwrap();

    todo_cmd(dir.path())
        .args(["exec", "stats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("upcoming_days must be between 0 and 3650"));

    fs::remove_file(dir.path().join(".todo.toml")).unwrap();
    todo_cmd(dir.path())
        .args(["exec", "stats --days 100000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--days"));
}

#[test]
fn test_global_default_format() {
    let dir = TempDir::new().unwrap();
    let config_dir = dir.path().join(".config").join("todolist");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "default_format = \"json\"\n").unwrap();

    todo_cmd(dir.path())
        .args(["exec", "add Task"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""title":"Task""#));
}

#[test]
fn test_config_command_shows_project_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    fs::write(&path, "upcoming_days = 21\n").unwrap();

    todo_cmd(dir.path())
        .arg("--config")
        .arg(&path)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("upcoming_days = 21"))
        .stdout(predicate::str::contains("custom.toml"));
}
