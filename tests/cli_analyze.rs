//! Integration tests for the analyze / logs / clear-logs commands.

use assert_cmd::Command;
use chrono::{Duration, Utc};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn autodev(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("claude-autodev").unwrap();
    cmd.env("CLAUDE_PLUGIN_ROOT", dir.path());
    cmd
}

fn entry_line(event_type: &str, timestamp: &str, data: &str) -> String {
    format!(
        r#"{{"timestamp":"{}","event_type":"{}","hook":"Test","success":true,"data":{}}}"#,
        timestamp, event_type, data
    )
}

fn seed_log(dir: &TempDir, lines: &[String]) {
    let logs = dir.path().join("logs");
    fs::create_dir_all(&logs).unwrap();
    fs::write(logs.join("activity.jsonl"), lines.join("\n")).unwrap();
}

// ============================================================================
// Help / version tests
// ============================================================================

#[test]
fn test_cli_help_displays() {
    Command::cargo_bin("claude-autodev")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Autonomous-dev hooks for Claude Code"));
}

#[test]
fn test_cli_version_displays() {
    Command::cargo_bin("claude-autodev")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("claude-autodev"));
}

// ============================================================================
// Analyze command tests
// ============================================================================

#[test]
fn test_analyze_missing_log_file() {
    let dir = TempDir::new().unwrap();

    autodev(&dir)
        .arg("analyze")
        .assert()
        .success()
        .stdout(predicate::str::contains("No activity log found at"))
        .stdout(predicate::str::contains(
            "Activity logging starts with your next Claude Code interaction.",
        ));
}

#[test]
fn test_analyze_empty_log() {
    let dir = TempDir::new().unwrap();
    seed_log(&dir, &["".to_string()]);

    autodev(&dir)
        .arg("analyze")
        .assert()
        .success()
        .stdout(predicate::str::contains("No activity entries found."));
}

#[test]
fn test_analyze_report() {
    let dir = TempDir::new().unwrap();
    seed_log(
        &dir,
        &[
            entry_line(
                "prompt_classification",
                "2025-06-01T09:00:00Z",
                r#"{"classification":"CODING_TASK","is_multi_request":false}"#,
            ),
            entry_line(
                "prompt_classification",
                "2025-06-01T10:00:00Z",
                r#"{"classification":"QUICK_QUESTION","is_multi_request":false}"#,
            ),
            entry_line(
                "subagent_test_gate",
                "2025-06-01T11:00:00Z",
                r#"{"tests_passed":false,"backend_passed":false,"frontend_passed":true,"blocked":true}"#,
            ),
            entry_line(
                "session_stop",
                "2025-06-02T12:00:00Z",
                r#"{"code_modified":true,"tests_run":true,"tests_passed":true,"files_changed":["app.py"]}"#,
            ),
        ],
    );

    autodev(&dir)
        .arg("analyze")
        .assert()
        .success()
        .stdout(predicate::str::contains("AUTONOMOUS-DEV ACTIVITY REPORT"))
        .stdout(predicate::str::contains("Date Range: 2025-06-01 to 2025-06-02"))
        .stdout(predicate::str::contains("Total Events: 4"))
        .stdout(predicate::str::contains("Total Prompts:      2"))
        .stdout(predicate::str::contains("Coding Tasks:       1 (50.0%)"))
        .stdout(predicate::str::contains("Blocked:            1"))
        .stdout(predicate::str::contains("Backend Failures:   1"))
        .stdout(predicate::str::contains("With Code Changes:  1"))
        .stdout(predicate::str::contains("2025-06-01: 2 prompts, 1 subagents"));
}

#[test]
fn test_analyze_json_output() {
    let dir = TempDir::new().unwrap();
    seed_log(
        &dir,
        &[entry_line(
            "prompt_classification",
            "2025-06-01T09:00:00Z",
            r#"{"classification":"CODING_TASK","is_multi_request":true}"#,
        )],
    );

    let output = autodev(&dir)
        .args(["analyze", "--json"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let metrics: serde_json::Value =
        serde_json::from_str(&stdout).expect("analyze --json emits valid JSON");
    assert_eq!(metrics["total_events"], 1);
    assert_eq!(metrics["prompts"]["coding_tasks"], 1);
    assert_eq!(metrics["prompts"]["multi_request"], 1);
}

#[test]
fn test_analyze_days_filter() {
    let dir = TempDir::new().unwrap();
    let old = (Utc::now() - Duration::days(30)).to_rfc3339();
    let recent = Utc::now().to_rfc3339();
    seed_log(
        &dir,
        &[
            entry_line(
                "prompt_classification",
                &old,
                r#"{"classification":"CODING_TASK","is_multi_request":false}"#,
            ),
            entry_line(
                "prompt_classification",
                &recent,
                r#"{"classification":"QUICK_QUESTION","is_multi_request":false}"#,
            ),
        ],
    );

    autodev(&dir)
        .args(["analyze", "--days", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Events: 1"))
        .stdout(predicate::str::contains("Quick Questions:    1"));
}

// ============================================================================
// Logs command tests
// ============================================================================

#[test]
fn test_logs_newest_first() {
    let dir = TempDir::new().unwrap();
    seed_log(
        &dir,
        &[
            entry_line("prompt_submitted", "2025-06-01T09:00:00Z", "{}"),
            entry_line("session_stop", "2025-06-02T09:00:00Z", "{}"),
        ],
    );

    let output = autodev(&dir)
        .args(["logs", "10"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("session_stop"));
    assert!(lines[1].contains("prompt_submitted"));
}

#[test]
fn test_logs_event_type_filter() {
    let dir = TempDir::new().unwrap();
    seed_log(
        &dir,
        &[
            entry_line("prompt_submitted", "2025-06-01T09:00:00Z", "{}"),
            entry_line("session_stop", "2025-06-02T09:00:00Z", "{}"),
        ],
    );

    autodev(&dir)
        .args(["logs", "10", "session_stop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("session_stop"))
        .stdout(predicate::str::contains("prompt_submitted").not());
}

#[test]
fn test_logs_empty_log() {
    let dir = TempDir::new().unwrap();

    autodev(&dir)
        .arg("logs")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// ============================================================================
// ClearLogs command tests
// ============================================================================

#[test]
fn test_clear_logs_reports_count() {
    let dir = TempDir::new().unwrap();
    seed_log(
        &dir,
        &[
            entry_line("prompt_submitted", "2025-06-01T09:00:00Z", "{}"),
            entry_line("session_stop", "2025-06-02T09:00:00Z", "{}"),
        ],
    );

    autodev(&dir)
        .arg("clear-logs")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 2 activity entries."));

    // Log is now empty
    autodev(&dir)
        .arg("analyze")
        .assert()
        .success()
        .stdout(predicate::str::contains("No activity entries found."));
}

#[test]
fn test_clear_logs_missing_file() {
    let dir = TempDir::new().unwrap();

    autodev(&dir)
        .arg("clear-logs")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 0 activity entries."));
}
