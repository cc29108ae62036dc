// CLI Parser - Clap derive definitions
// Hook subcommands read their event payload from stdin.

use clap::{Parser, Subcommand};

/// Claude-Autodev: autonomous-dev hooks CLI
#[derive(Parser, Debug)]
#[command(name = "claude-autodev")]
#[command(version)]
#[command(about = "Autonomous-dev hooks for Claude Code: prompt classification, test gates, activity analytics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// UserPromptSubmit hook: classify the prompt and emit guidance context
    ClassifyPrompt,

    /// UserPromptSubmit hook: record the prompt submission
    LogPrompt,

    /// SubagentStop hook: run configured tests, block completion on failure
    TestGate,

    /// Stop hook: run tests only when code changed, block the stop on failure
    SmartStop,

    /// Summarize the activity log
    Analyze {
        /// Only analyze the last N days
        #[arg(long)]
        days: Option<i64>,

        /// Output metrics as JSON
        #[arg(long)]
        json: bool,
    },

    /// View recent activity entries (newest first, one JSON object per line)
    Logs {
        /// Number of entries
        #[arg(default_value = "50")]
        n: usize,

        /// Filter by event type
        event_type: Option<String>,
    },

    /// Clear the activity log
    ClearLogs,
}

// ============================================================================
// Tests
// ============================================================================
