//! Test command execution for the stop gates.
//!
//! Commands run through the platform shell in the project directory, with a
//! per-command timeout. The gates only care about pass/fail plus a failure
//! message they can hand back to the agent.

use std::env;
use std::path::Path;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

use crate::config::TestCommandConfig;

/// Outcome of one configured test command.
#[derive(Debug, Clone, PartialEq)]
pub struct TestOutcome {
    pub passed: bool,
    /// Failure description, empty when passed
    pub output: String,
}

impl TestOutcome {
    fn pass() -> Self {
        Self {
            passed: true,
            output: String::new(),
        }
    }

    fn fail(output: String) -> Self {
        Self {
            passed: false,
            output,
        }
    }
}

/// Project directory the tests run against.
///
/// `CLAUDE_PROJECT_DIR` when the host exports it, the working directory
/// otherwise. Windows drive letters are normalized to uppercase so configured
/// paths compare consistently.
pub fn project_dir() -> String {
    let path = env::var("CLAUDE_PROJECT_DIR")
        .ok()
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| {
            env::current_dir()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_else(|_| ".".to_string())
        });

    normalize_drive_letter(&path)
}

fn normalize_drive_letter(path: &str) -> String {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_lowercase() {
        let mut normalized = String::with_capacity(path.len());
        normalized.push(bytes[0].to_ascii_uppercase() as char);
        normalized.push_str(&path[1..]);
        return normalized;
    }
    path.to_string()
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", command]);
    cmd
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", command]);
    cmd
}

/// Run a single configured test command.
///
/// A disabled command passes without running. Failure text carries the
/// command's stdout/stderr so the blocked agent can see what broke.
pub async fn run_test_command(
    name: &str,
    config: &TestCommandConfig,
    project_dir: &str,
) -> TestOutcome {
    if !config.enabled {
        return TestOutcome::pass();
    }

    let directory = Path::new(project_dir).join(&config.directory);

    eprintln!("Running {} tests...", name);

    let mut cmd = shell_command(&config.command);
    cmd.current_dir(&directory)
        .stdin(std::process::Stdio::null())
        .kill_on_drop(true);

    let result = timeout(Duration::from_secs(config.timeout), cmd.output()).await;

    match result {
        Ok(Ok(output)) => {
            if output.status.success() {
                TestOutcome::pass()
            } else {
                TestOutcome::fail(format!(
                    "{} tests failed:\n{}\n{}",
                    name,
                    String::from_utf8_lossy(&output.stdout),
                    String::from_utf8_lossy(&output.stderr)
                ))
            }
        }
        Ok(Err(e)) => TestOutcome::fail(format!("{} tests error: {}", name, e)),
        Err(_) => TestOutcome::fail(format!(
            "{} tests timed out after {} seconds",
            name, config.timeout
        )),
    }
}
