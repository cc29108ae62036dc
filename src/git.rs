//! Git integration for the smart stop gate.
//!
//! Captures repository status and reduces it to "which source files changed",
//! so the gate can skip test runs for sessions that never touched code.

use std::path::Path;
use std::process::Command;

use serde::{Deserialize, Serialize};

use crate::config::CodeExtensions;
use crate::error::{AutodevError, Result};

/// Snapshot of a repository's working tree state
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GitStatus {
    /// Current branch name (e.g., "main", "feature/foo")
    pub branch: String,
    /// Files modified in the worktree but not staged
    pub modified: Vec<String>,
    /// Files not tracked by git
    pub untracked: Vec<String>,
    /// Files staged for commit
    pub staged: Vec<String>,
}

/// Parse `git status --porcelain` output.
///
/// Two-character codes: X is the staged status, Y the worktree status.
/// "??" is untracked, " M" worktree-modified, "M " staged, "MM" both.
fn parse_porcelain(output: &str) -> GitStatus {
    let mut status = GitStatus::default();

    for line in output.lines() {
        if line.len() < 3 {
            continue;
        }

        let staged_code = line.chars().next().unwrap_or(' ');
        let worktree_code = line.chars().nth(1).unwrap_or(' ');
        let filename = line[3..].to_string();

        if staged_code == '?' && worktree_code == '?' {
            status.untracked.push(filename);
            continue;
        }

        if staged_code != ' ' && staged_code != '?' {
            status.staged.push(filename.clone());
        }

        if worktree_code == 'M' {
            status.modified.push(filename);
        }
    }

    status
}

/// Get the git status for a directory.
///
/// Returns `Ok(None)` when the path is not inside a git repository (or git
/// itself is missing), so callers can treat "no repo" as "no changes".
pub fn get_git_status(path: &str) -> Result<Option<GitStatus>> {
    let rev_parse = Command::new("git")
        .args(["rev-parse", "--is-inside-work-tree"])
        .current_dir(path)
        .output();

    let output = match rev_parse {
        Ok(o) => o,
        Err(e) => {
            if e.kind() == std::io::ErrorKind::NotFound {
                return Ok(None);
            }
            return Err(AutodevError::Io(e));
        }
    };

    if !output.status.success() {
        return Ok(None);
    }

    let branch_output = Command::new("git")
        .args(["rev-parse", "--abbrev-ref", "HEAD"])
        .current_dir(path)
        .output()
        .map_err(AutodevError::Io)?;

    let branch = String::from_utf8_lossy(&branch_output.stdout)
        .trim()
        .to_string();

    let status_output = Command::new("git")
        .args(["status", "--porcelain"])
        .current_dir(path)
        .output()
        .map_err(AutodevError::Io)?;

    let porcelain = String::from_utf8_lossy(&status_output.stdout);
    let mut status = parse_porcelain(&porcelain);
    status.branch = branch;

    Ok(Some(status))
}

/// Tracked files with pending changes (modified or staged) whose extension is
/// one of the configured code extensions. Untracked files do not count.
pub fn changed_code_files(status: &GitStatus, extensions: &CodeExtensions) -> Vec<String> {
    let mut files: Vec<String> = Vec::new();

    for filename in status.modified.iter().chain(status.staged.iter()) {
        let ext = Path::new(filename)
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        if extensions.contains(&ext) && !files.contains(filename) {
            files.push(filename.clone());
        }
    }

    files
}

/// Changed code files for a project directory, degrading every failure mode
/// (no repo, no git, IO error) to an empty list.
pub fn detect_code_changes(project_dir: &str, extensions: &CodeExtensions) -> Vec<String> {
    match get_git_status(project_dir) {
        Ok(Some(status)) => changed_code_files(&status, extensions),
        _ => Vec::new(),
    }
}
