//! JSONL activity log shared by all hooks.
//!
//! One JSON object per line under `<plugin root>/logs/activity.jsonl`
//! (configurable). Writing is best-effort: logging must never break a hook.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::config::PluginConfig;
use crate::error::Result;

/// A single activity log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: DateTime<Utc>,
    pub event_type: String,
    pub hook: String,
    pub success: bool,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl ActivityEntry {
    pub fn new(
        event_type: impl Into<String>,
        hook: impl Into<String>,
        success: bool,
        data: serde_json::Value,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            event_type: event_type.into(),
            hook: hook.into(),
            success,
            data,
        }
    }
}

/// Char-safe preview of a prompt for log entries.
fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Append an entry to the activity log.
///
/// No-op when logging is disabled. Errors are swallowed by the typed helpers
/// below; this function reports them for callers that care (tests, CLI).
pub fn log_activity(config: &PluginConfig, entry: &ActivityEntry) -> Result<()> {
    if !config.logging.enabled {
        return Ok(());
    }

    let path = config.log_path()?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{}", serde_json::to_string(entry)?)?;
    writer.flush()?;

    Ok(())
}

/// Log a prompt classification event.
pub fn log_prompt_classification(
    config: &PluginConfig,
    prompt: &str,
    classification: &str,
    request_count: usize,
    coding_count: usize,
    quick_count: usize,
) {
    let entry = ActivityEntry::new(
        "prompt_classification",
        "UserPromptSubmit",
        true,
        json!({
            "prompt_preview": preview(prompt, 100),
            "classification": classification,
            "is_multi_request": request_count > 1,
            "request_count": request_count,
            "coding_count": coding_count,
            "quick_count": quick_count,
        }),
    );
    let _ = log_activity(config, &entry);
}

/// Log a bare prompt submission (the log-prompt hook).
pub fn log_prompt_submitted(config: &PluginConfig, prompt: &str) {
    let entry = ActivityEntry::new(
        "prompt_submitted",
        "UserPromptSubmit",
        true,
        json!({ "prompt_preview": preview(prompt, 100) }),
    );
    let _ = log_activity(config, &entry);
}

/// Log a subagent test gate result.
pub fn log_subagent_gate(
    config: &PluginConfig,
    tests_passed: bool,
    backend_passed: Option<bool>,
    frontend_passed: Option<bool>,
    error_summary: Option<&str>,
) {
    let entry = ActivityEntry::new(
        "subagent_test_gate",
        "SubagentStop",
        tests_passed,
        json!({
            "tests_passed": tests_passed,
            "backend_passed": backend_passed,
            "frontend_passed": frontend_passed,
            "blocked": !tests_passed,
            "error_summary": error_summary.map(|s| preview(s, 500)),
        }),
    );
    let _ = log_activity(config, &entry);
}

/// Log a session stop event.
pub fn log_session_stop(
    config: &PluginConfig,
    code_modified: bool,
    tests_run: bool,
    tests_passed: Option<bool>,
    files_changed: &[String],
) {
    let entry = ActivityEntry::new(
        "session_stop",
        "Stop",
        if tests_run { tests_passed.unwrap_or(false) } else { true },
        json!({
            "code_modified": code_modified,
            "tests_run": tests_run,
            "tests_passed": tests_passed,
            "files_changed": files_changed,
        }),
    );
    let _ = log_activity(config, &entry);
}

/// Read entries from a JSONL activity log, skipping malformed lines.
///
/// With `days` set, entries older than that many days are dropped.
pub fn read_entries(path: &Path, days: Option<i64>) -> Result<Vec<ActivityEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let cutoff = days.map(|d| Utc::now() - Duration::days(d));

    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let entries = reader
        .lines()
        .map_while(|line| line.ok())
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| serde_json::from_str::<ActivityEntry>(&line).ok())
        .filter(|entry| cutoff.map_or(true, |c| entry.timestamp >= c))
        .collect();

    Ok(entries)
}

/// Read the most recent entries, newest first, optionally filtered by event type.
pub fn recent_entries(
    path: &Path,
    limit: usize,
    event_type: Option<&str>,
) -> Result<Vec<ActivityEntry>> {
    let mut entries: Vec<ActivityEntry> = read_entries(path, None)?
        .into_iter()
        .filter(|entry| {
            event_type.map_or(true, |t| entry.event_type.eq_ignore_ascii_case(t))
        })
        .collect();

    entries.reverse();
    entries.truncate(limit);

    Ok(entries)
}

/// Truncate the activity log, returning the number of entries removed.
pub fn clear_log(path: &Path) -> Result<usize> {
    if !path.exists() {
        return Ok(0);
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let count = reader
        .lines()
        .map_while(|line| line.ok())
        .filter(|line| !line.trim().is_empty())
        .count();

    File::create(path)?;

    Ok(count)
}
