//! Hook handlers for Claude Code settings.json integration.
//!
//! Each hook reads the event payload as JSON from stdin. A hook that wants to
//! block completion prints a `{"decision": "block", ...}` object on stdout;
//! anything else (including no output at all) lets the session proceed.

pub mod classify_prompt;
pub mod debug;
pub mod log_prompt;
pub mod smart_stop;
pub mod test_gate;

pub use classify_prompt::handle_classify_prompt;
pub use log_prompt::handle_log_prompt;
pub use smart_stop::handle_smart_stop;
pub use test_gate::handle_test_gate;

use serde::{Deserialize, Serialize};

/// Standard input format for hooks (from Claude Code)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookInput {
    /// Claude's session identifier
    #[serde(alias = "sessionId")]
    pub session_id: Option<String>,
    /// User's prompt (for UserPromptSubmit)
    pub prompt: Option<String>,
    /// Path to transcript file
    pub transcript_path: Option<String>,
    /// Current working directory
    pub cwd: Option<String>,
    /// Hook event name
    pub hook_event_name: Option<String>,
    /// Set on Stop events re-fired after a previous block
    pub stop_hook_active: Option<bool>,
}

impl HookInput {
    /// Parse a hook payload from raw stdin bytes.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

/// Gate decision returned by the stop hooks.
#[derive(Debug, Clone, Serialize)]
pub struct HookOutput {
    pub decision: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl HookOutput {
    /// Allow the session/subagent to complete. Nothing is printed.
    pub fn approve() -> Self {
        Self {
            decision: "approve".to_string(),
            reason: None,
        }
    }

    /// Block completion with a reason shown to the agent.
    pub fn block(reason: String) -> Self {
        Self {
            decision: "block".to_string(),
            reason: Some(reason),
        }
    }

    pub fn is_block(&self) -> bool {
        self.decision == "block"
    }

    /// Print the decision JSON on stdout when blocking.
    ///
    /// Approvals stay silent: the host treats absent output as approval, and
    /// the classify hook owns stdout for its context text.
    pub fn emit(&self) {
        if self.is_block() {
            if let Ok(json) = serde_json::to_string(self) {
                println!("{}", json);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_output_approve() {
        let output = HookOutput::approve();
        assert_eq!(output.decision, "approve");
        assert!(output.reason.is_none());
        assert!(!output.is_block());
    }

    #[test]
    fn test_hook_output_block() {
        let output = HookOutput::block("tests failed".to_string());
        assert_eq!(output.decision, "block");
        assert_eq!(output.reason, Some("tests failed".to_string()));
        assert!(output.is_block());
    }

    #[test]
    fn test_hook_output_block_serialization() {
        let output = HookOutput::block("validation failed".to_string());
        let json = serde_json::to_string(&output).unwrap();
        assert!(json.contains("\"decision\":\"block\""));
        assert!(json.contains("\"reason\":\"validation failed\""));
    }

    #[test]
    fn test_hook_output_approve_serialization_no_reason() {
        let output = HookOutput::approve();
        let json = serde_json::to_string(&output).unwrap();
        assert!(!json.contains("reason")); // skip_serializing_if
    }

    #[test]
    fn test_hook_input_deserialization() {
        let json = r#"{"session_id": "abc-123", "prompt": "hello"}"#;
        let input = HookInput::from_json(json).unwrap();
        assert_eq!(input.session_id, Some("abc-123".to_string()));
        assert_eq!(input.prompt, Some("hello".to_string()));
    }

    #[test]
    fn test_hook_input_deserialization_camel_case() {
        let json = r#"{"sessionId": "abc-123"}"#;
        let input = HookInput::from_json(json).unwrap();
        assert_eq!(input.session_id, Some("abc-123".to_string()));
    }

    #[test]
    fn test_hook_input_all_fields() {
        let json = r#"{
            "session_id": "sess-123",
            "prompt": "test prompt",
            "transcript_path": "/tmp/transcript.jsonl",
            "cwd": "/home/user/project",
            "hook_event_name": "Stop",
            "stop_hook_active": true
        }"#;
        let input = HookInput::from_json(json).unwrap();
        assert_eq!(input.session_id, Some("sess-123".to_string()));
        assert_eq!(input.prompt, Some("test prompt".to_string()));
        assert_eq!(input.transcript_path, Some("/tmp/transcript.jsonl".to_string()));
        assert_eq!(input.cwd, Some("/home/user/project".to_string()));
        assert_eq!(input.hook_event_name, Some("Stop".to_string()));
        assert_eq!(input.stop_hook_active, Some(true));
    }

    #[test]
    fn test_hook_input_empty_json() {
        let input = HookInput::from_json("{}").unwrap();
        assert!(input.session_id.is_none());
        assert!(input.prompt.is_none());
        assert!(input.stop_hook_active.is_none());
    }

    #[test]
    fn test_hook_input_ignores_unknown_fields() {
        let json = r#"{"prompt": "hi", "permission_mode": "acceptEdits", "extra": 42}"#;
        let input = HookInput::from_json(json).unwrap();
        assert_eq!(input.prompt, Some("hi".to_string()));
    }

    #[test]
    fn test_hook_input_invalid_json_fails() {
        assert!(HookInput::from_json("not json").is_err());
    }

    #[test]
    fn test_hook_input_unicode_prompt() {
        let json = r#"{"prompt": "你好世界 🌍"}"#;
        let input = HookInput::from_json(json).unwrap();
        assert_eq!(input.prompt, Some("你好世界 🌍".to_string()));
    }
}
