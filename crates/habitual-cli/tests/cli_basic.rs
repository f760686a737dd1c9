//! Basic CLI E2E tests.
//!
//! Each test runs the `habitual` binary against its own temporary data
//! directory and checks the output.

use std::path::Path;
use std::process::Command;

use chrono::{Datelike, Local};

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    run_cli_with_input(data_dir, args, "")
}

fn run_cli_with_input(data_dir: &Path, args: &[&str], input: &str) -> (String, String, i32) {
    use std::io::Write;
    use std::process::Stdio;

    let mut child = Command::new(env!("CARGO_BIN_EXE_habitual"))
        .args(args)
        .env("HABITUAL_DATA_DIR", data_dir)
        .env_remove("HABITUAL_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");
    let output = child.wait_with_output().expect("Failed to wait for CLI");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn add_habit(data_dir: &Path, name: &str) -> i64 {
    let (stdout, _, code) = run_cli(data_dir, &["habit", "add", name]);
    assert_eq!(code, 0, "habit add failed");
    stdout
        .lines()
        .find_map(|l| l.strip_prefix("Habit added: "))
        .and_then(|id| id.trim().parse().ok())
        .expect("habit add should print the new id")
}

#[test]
fn test_habit_add_and_list() {
    let dir = tempfile::tempdir().unwrap();
    add_habit(dir.path(), "Read");

    let (stdout, _, code) = run_cli(dir.path(), &["habit", "list", "--json"]);
    assert_eq!(code, 0, "habit list failed");
    let habits: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(habits.as_array().unwrap().len(), 1);
    assert_eq!(habits[0]["name"], "Read");
    assert_eq!(habits[0]["completedDays"].as_array().unwrap().len(), 0);
}

#[test]
fn test_habit_add_rejects_blank_name() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["habit", "add", "   "]);
    assert_eq!(code, 1);
    assert!(stderr.contains("empty"));
}

#[test]
fn test_toggle_today_shows_in_day_view() {
    let dir = tempfile::tempdir().unwrap();
    let id = add_habit(dir.path(), "Read").to_string();

    let (stdout, _, code) = run_cli(dir.path(), &["toggle", &id]);
    assert_eq!(code, 0, "toggle failed");
    assert!(stdout.contains("completed"));

    let (stdout, _, code) = run_cli(dir.path(), &["view", "day"]);
    assert_eq!(code, 0, "view failed");
    assert!(stdout.contains("[x] Read"));

    let (stdout, _, _) = run_cli(dir.path(), &["status", "--json"]);
    let status: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(status["completed"], true);
}

#[test]
fn test_toggle_last_year_is_locked() {
    let dir = tempfile::tempdir().unwrap();
    let id = add_habit(dir.path(), "Read").to_string();
    let last_year = format!("{}-06-01", Local::now().year() - 1);

    let (stdout, _, code) = run_cli(dir.path(), &["toggle", &id, "--date", &last_year]);
    assert_eq!(code, 0);
    assert!(stdout.contains("outside the current year"));
}

#[test]
fn test_delete_unknown_habit_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["habit", "delete", "12345"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("nothing deleted"));
}

#[test]
fn test_month_view_json() {
    let dir = tempfile::tempdir().unwrap();
    let date = format!("{}-04-15", Local::now().year());
    let (stdout, _, code) = run_cli(dir.path(), &["view", "month", "--date", &date, "--json"]);
    assert_eq!(code, 0, "month view failed");
    let screen: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(screen["screen"], "month");
    assert_eq!(screen["month"], 4);
}

#[test]
fn test_config_set_and_get() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["config", "set", "calendar.week_start", "monday"]);
    assert_eq!(code, 0, "config set failed");
    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "calendar.week_start"]);
    assert_eq!(code, 0, "config get failed");
    assert_eq!(stdout.trim(), "monday");
}

#[test]
fn test_config_get_unknown_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "get", "calendar.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_json_backend_writes_habits_file() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["config", "set", "storage.backend", "json"]);
    add_habit(dir.path(), "Stretch");
    assert!(dir.path().join("habits.json").exists());
}

#[test]
fn test_shell_session() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli_with_input(
        dir.path(),
        &["shell"],
        "add Meditate\nweek\nhabits\nquit\n",
    );
    assert_eq!(code, 0, "shell failed");
    assert!(stdout.contains("Daily View"));
    assert!(stdout.contains("Weekly View"));
    assert!(stdout.contains("Meditate (0 times)"));
}
