//! SubagentStop hook: run tests when a subagent completes.
//!
//! Blocks completion if the configured backend/frontend test commands fail,
//! forcing the agent to fix the issues before handing work back.

use crate::activity;
use crate::config::PluginConfig;
use crate::runner::run_test_command;

use super::{debug, HookOutput};

const HOOK_NAME: &str = "test-gate";

/// Handle the test-gate hook.
///
/// Runs the `backend` and `frontend` entries of `testCommands` (each only when
/// enabled) against `project_dir`, logs the gate result, and blocks on any
/// failure. Always returns a decision; never errors out of the process.
pub async fn handle_test_gate(config: &PluginConfig, project_dir: &str) -> HookOutput {
    eprintln!("=== SubagentStop Test Gate ===");
    eprintln!("Running tests to verify subagent work...");

    let mut failures: Vec<String> = Vec::new();
    let mut backend_passed = true;
    let mut frontend_passed = true;

    let backend = config.test_command("backend");
    if backend.enabled {
        let outcome = run_test_command("backend", &backend, project_dir).await;
        backend_passed = outcome.passed;
        if !outcome.passed {
            failures.push(outcome.output);
        }
    }

    let frontend = config.test_command("frontend");
    if frontend.enabled {
        let outcome = run_test_command("frontend", &frontend, project_dir).await;
        frontend_passed = outcome.passed;
        if !outcome.passed {
            failures.push(outcome.output);
        }
    }

    let all_passed = backend_passed && frontend_passed;
    let output = failures.join("\n\n");

    debug::debug(
        HOOK_NAME,
        &format!(
            "backend_passed={} frontend_passed={} blocked={}",
            backend_passed, frontend_passed, !all_passed
        ),
    );

    activity::log_subagent_gate(
        config,
        all_passed,
        Some(backend_passed),
        Some(frontend_passed),
        if all_passed { None } else { Some(&output) },
    );

    if !all_passed {
        eprintln!("Tests failed! Blocking subagent completion.");
        HookOutput::block(format!(
            "Tests failed. Please fix the issues before completing:\n\n{}",
            output
        ))
    } else {
        eprintln!("All tests passed! Subagent may complete.");
        HookOutput::approve()
    }
}
