//! Stop hook: only run tests if code was modified this session.
//!
//! Prevents unnecessary test runs for quick questions and exploration, and
//! blocks the stop when modified code fails the configured test commands.

use crate::activity;
use crate::config::PluginConfig;
use crate::git::detect_code_changes;
use crate::runner::run_test_command;

use super::{debug, HookOutput};

const HOOK_NAME: &str = "smart-stop";

/// Handle the smart-stop hook.
///
/// Checks the project's git state for pending code changes; with none, the
/// stop is approved without running anything. Otherwise every enabled entry
/// in `testCommands` runs, and any failure blocks the stop.
pub async fn handle_smart_stop(config: &PluginConfig, project_dir: &str) -> HookOutput {
    eprintln!("=== Smart Stop Hook ===");

    let changed_files = detect_code_changes(project_dir, &config.code_extensions);

    if changed_files.is_empty() {
        eprintln!("No code changes detected, skipping tests.");
        debug::debug(HOOK_NAME, "no code changes, approving");
        activity::log_session_stop(config, false, false, None, &[]);
        return HookOutput::approve();
    }

    eprintln!(
        "Code changes detected ({} files), running tests...",
        changed_files.len()
    );

    let mut failures: Vec<String> = Vec::new();
    for (name, test_config) in &config.test_commands {
        if test_config.enabled {
            let outcome = run_test_command(name, test_config, project_dir).await;
            if !outcome.passed {
                failures.push(outcome.output);
            }
        }
    }

    let success = failures.is_empty();

    debug::debug(
        HOOK_NAME,
        &format!(
            "{} changed file(s), tests_passed={}",
            changed_files.len(),
            success
        ),
    );

    activity::log_session_stop(config, true, true, Some(success), &changed_files);

    if !success {
        eprintln!("Tests failed! Blocking stop.");
        HookOutput::block(format!(
            "Tests failed. Please fix the issues before stopping:\n\n{}",
            failures.join("\n\n")
        ))
    } else {
        eprintln!("All tests passed!");
        HookOutput::approve()
    }
}
