//! Shared debug tracing for hooks.
//!
//! Opt-in via the `AUTODEV_DEBUG` env var; each hook gets its own log file at
//! `/tmp/autodev-{hook_name}-hook.log`. Installed hooks stay quiet otherwise.

use chrono::Utc;
use std::fs::OpenOptions;
use std::io::Write;

/// Whether debug tracing is enabled for this process
pub fn enabled() -> bool {
    std::env::var("AUTODEV_DEBUG").map_or(false, |v| !v.is_empty() && v != "0")
}

/// Get log file path for a specific hook
pub fn get_log_path(hook_name: &str) -> String {
    format!("/tmp/autodev-{}-hook.log", hook_name)
}

/// Debug logging with hook name prefix
pub fn debug(hook_name: &str, msg: &str) {
    if !enabled() {
        return;
    }
    write_line(hook_name, msg);
}

fn write_line(hook_name: &str, msg: &str) {
    let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
    let line = format!("[{}] [{}] {}\n", timestamp, hook_name, msg);
    let log_path = get_log_path(hook_name);
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&log_path) {
        let _ = file.write_all(line.as_bytes());
    }
}
