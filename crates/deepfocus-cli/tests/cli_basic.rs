//! Basic CLI E2E tests.
//!
//! Each test runs the built binary with HOME pointed at a fresh temporary
//! directory so the real data directory is never touched.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_deepfocus-cli"))
        .args(args)
        .env("HOME", home)
        .env_remove("DEEPFOCUS_ENV")
        .env_remove("DEEPFOCUS_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_cli_success(home: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "CLI command failed: {:?}\n{}", args, stderr);
    stdout
}

#[test]
fn test_task_list_has_defaults() {
    let home = tempfile::tempdir().unwrap();
    let out = run_cli_success(home.path(), &["task", "list", "--json"]);
    let tasks: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(tasks.as_array().unwrap().len(), 4);
    assert_eq!(tasks[0]["name"], "Default Task");
}

#[test]
fn test_task_add_and_delete() {
    let home = tempfile::tempdir().unwrap();
    let out = run_cli_success(home.path(), &["task", "add", "Thesis"]);
    assert!(out.contains("Task created: Thesis"));

    let (_, stderr, code) = run_cli(home.path(), &["task", "delete", "999"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("task not found"));
}

#[test]
fn test_record_focus_updates_streak() {
    let home = tempfile::tempdir().unwrap();
    let out = run_cli_success(home.path(), &["record", "add", "--minutes", "25"]);
    assert!(out.contains("Recorded 25m focus for Default Task"));

    let streak = run_cli_success(home.path(), &["achievement", "streak"]);
    assert_eq!(streak.trim(), "1");
}

#[test]
fn test_break_does_not_count() {
    let home = tempfile::tempdir().unwrap();
    run_cli_success(home.path(), &["record", "add", "--kind", "short-break"]);
    let streak = run_cli_success(home.path(), &["achievement", "streak"]);
    assert_eq!(streak.trim(), "0");
}

#[test]
fn test_record_stats() {
    let home = tempfile::tempdir().unwrap();
    run_cli_success(home.path(), &["record", "add", "--minutes", "30"]);
    let out = run_cli_success(home.path(), &["record", "stats"]);
    assert!(out.contains("Today:      30m"));
    assert!(out.contains("Sessions:   1"));
}

#[test]
fn test_achievement_list_json() {
    let home = tempfile::tempdir().unwrap();
    let out = run_cli_success(home.path(), &["achievement", "list", "--json"]);
    let list: serde_json::Value = serde_json::from_str(&out).unwrap();
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 12);
    assert!(list.iter().all(|a| a["unlocked"] == false));
}

#[test]
fn test_manual_unlock() {
    let home = tempfile::tempdir().unwrap();
    assert_eq!(
        run_cli_success(home.path(), &["achievement", "unlock", "total_50"]).trim(),
        "ok"
    );
    let out = run_cli_success(home.path(), &["achievement", "unlock", "total_50"]);
    assert!(out.contains("already unlocked"));
    let out = run_cli_success(home.path(), &["achievement", "unlock", "nope"]);
    assert!(out.contains("unknown achievement"));
}

#[test]
fn test_config_get_set() {
    let home = tempfile::tempdir().unwrap();
    assert_eq!(
        run_cli_success(home.path(), &["config", "get", "session.focus_minutes"]).trim(),
        "25"
    );
    run_cli_success(home.path(), &["config", "set", "session.focus_minutes", "50"]);
    assert_eq!(
        run_cli_success(home.path(), &["config", "get", "session.focus_minutes"]).trim(),
        "50"
    );
    let (_, _, code) = run_cli(home.path(), &["config", "set", "session.bogus", "1"]);
    assert_ne!(code, 0);
}
