//! UserPromptSubmit hook: record the prompt submission.
//!
//! Runs alongside classify-prompt, which owns stdout for context injection;
//! this hook only appends a `prompt_submitted` entry and stays silent.

use crate::activity;
use crate::config::PluginConfig;

use super::{HookInput, HookOutput};

/// Handle the log-prompt hook. Never fails, never prints.
pub async fn handle_log_prompt(raw: &str, config: &PluginConfig) -> HookOutput {
    if let Ok(input) = HookInput::from_json(raw) {
        if let Some(prompt) = input.prompt {
            if !prompt.trim().is_empty() {
                activity::log_prompt_submitted(config, &prompt);
            }
        }
    }

    HookOutput::approve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> PluginConfig {
        let mut config = PluginConfig::default();
        config.logging.log_file = dir
            .path()
            .join("logs/activity.jsonl")
            .to_string_lossy()
            .to_string();
        config
    }

    #[tokio::test]
    async fn test_logs_prompt_submission() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let output =
            handle_log_prompt(r#"{"prompt": "add retry logic to the client"}"#, &config).await;
        assert!(!output.is_block());

        let path = config.log_path().unwrap();
        let entries = activity::read_entries(&path, None).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event_type, "prompt_submitted");
        assert_eq!(entries[0].hook, "UserPromptSubmit");
        assert_eq!(entries[0].data["prompt_preview"], "add retry logic to the client");
    }

    #[tokio::test]
    async fn test_long_prompt_preview_capped_at_100_chars() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let prompt = "x".repeat(300);
        let payload = format!(r#"{{"prompt": "{}"}}"#, prompt);
        handle_log_prompt(&payload, &config).await;

        let path = config.log_path().unwrap();
        let entries = activity::read_entries(&path, None).unwrap();
        assert_eq!(
            entries[0].data["prompt_preview"].as_str().unwrap().len(),
            100
        );
    }

    #[tokio::test]
    async fn test_blank_prompt_not_logged() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        handle_log_prompt(r#"{"prompt": "  "}"#, &config).await;
        handle_log_prompt("{}", &config).await;

        let path = config.log_path().unwrap();
        assert!(activity::read_entries(&path, None).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_payload_approves() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let output = handle_log_prompt("garbage", &config).await;
        assert!(!output.is_block());

        let path = config.log_path().unwrap();
        assert!(activity::read_entries(&path, None).unwrap().is_empty());
    }
}
