//! Claude-Autodev: autonomous-dev hooks CLI
//!
//! Main entry point. Hook subcommands read their event payload from stdin and
//! always exit 0 - a broken hook must never break the host session. Blocking
//! is expressed through the decision JSON on stdout, not the exit code.

use clap::Parser;
use std::io::Read;

use claude_autodev::analyze::{analyze_entries, render_report};
use claude_autodev::hooks::{
    handle_classify_prompt, handle_log_prompt, handle_smart_stop, handle_test_gate,
};
use claude_autodev::{activity, runner, Cli, Command, PluginConfig, Result};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Run the dispatched command
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::ClassifyPrompt => {
            let config = PluginConfig::load_or_default();
            let output = handle_classify_prompt(&read_stdin(), &config).await;
            output.emit();
            Ok(())
        }

        Command::LogPrompt => {
            let config = PluginConfig::load_or_default();
            let output = handle_log_prompt(&read_stdin(), &config).await;
            output.emit();
            Ok(())
        }

        Command::TestGate => {
            let config = PluginConfig::load_or_default();
            let output = handle_test_gate(&config, &runner::project_dir()).await;
            output.emit();
            Ok(())
        }

        Command::SmartStop => {
            let config = PluginConfig::load_or_default();
            let output = handle_smart_stop(&config, &runner::project_dir()).await;
            output.emit();
            Ok(())
        }

        Command::Analyze { days, json } => {
            let config = PluginConfig::load()?;
            let path = config.activity_log_path();

            if !path.exists() {
                println!("No activity log found at {}", path.display());
                println!("Activity logging starts with your next Claude Code interaction.");
                return Ok(());
            }

            let entries = activity::read_entries(&path, days)?;
            if entries.is_empty() {
                println!("No activity entries found.");
                return Ok(());
            }

            let metrics = analyze_entries(&entries);
            if json {
                println!("{}", serde_json::to_string_pretty(&metrics)?);
            } else {
                print!("{}", render_report(&metrics));
            }
            Ok(())
        }

        Command::Logs { n, event_type } => {
            let config = PluginConfig::load()?;
            let entries =
                activity::recent_entries(&config.activity_log_path(), n, event_type.as_deref())?;
            for entry in &entries {
                println!("{}", serde_json::to_string(entry)?);
            }
            Ok(())
        }

        Command::ClearLogs => {
            let config = PluginConfig::load()?;
            let cleared = activity::clear_log(&config.activity_log_path())?;
            println!("Cleared {} activity entries.", cleared);
            Ok(())
        }
    }
}

/// Drain stdin for hook payloads. Read errors yield an empty payload, which
/// the handlers answer with their own advisory markers.
fn read_stdin() -> String {
    let mut buf = String::new();
    let _ = std::io::stdin().read_to_string(&mut buf);
    buf
}
