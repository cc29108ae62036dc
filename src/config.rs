use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::error::{AutodevError, Result};

/// Plugin configuration loaded from `<plugin root>/config.json`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginConfig {
    pub logging: LoggingConfig,
    pub test_commands: BTreeMap<String, TestCommandConfig>,
    pub code_extensions: CodeExtensions,
}

/// Activity log settings
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub log_file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_file: "logs/activity.jsonl".to_string(),
        }
    }
}

/// A single configured test command (e.g. "backend", "frontend")
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestCommandConfig {
    /// Entries are opt-in: absent or false means the gate skips this command
    pub enabled: bool,
    /// Directory relative to the project root
    pub directory: String,
    pub command: String,
    /// Timeout in seconds
    pub timeout: u64,
}

impl Default for TestCommandConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            directory: ".".to_string(),
            command: "npm test".to_string(),
            timeout: 120,
        }
    }
}

/// File extensions that count as source code for the stop gate
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct CodeExtensions(pub Vec<String>);

impl Default for CodeExtensions {
    fn default() -> Self {
        Self(
            [".py", ".ts", ".tsx", ".js", ".jsx"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }
}

impl CodeExtensions {
    pub fn contains(&self, ext: &str) -> bool {
        self.0.iter().any(|e| e == ext)
    }
}

impl PluginConfig {
    /// Load config from the standard location (`<plugin root>/config.json`)
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_path())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                AutodevError::Config(format!("Failed to read config file: {}", e))
            })?;
            let config: PluginConfig = serde_json::from_str(&content).map_err(|e| {
                AutodevError::Config(format!("Failed to parse config JSON: {}", e))
            })?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config, falling back to defaults on any error.
    ///
    /// Hook handlers use this: a malformed config.json must never take the
    /// host session down with it.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("claude-autodev: {} (using defaults)", e);
                Self::default()
            }
        }
    }

    /// Get the standard config file path
    pub fn config_path() -> PathBuf {
        plugin_root().join("config.json")
    }

    /// Activity log path, without touching the filesystem
    pub fn activity_log_path(&self) -> PathBuf {
        plugin_root().join(&self.logging.log_file)
    }

    /// Absolute path of the activity log, creating parent directories if needed
    pub fn log_path(&self) -> Result<PathBuf> {
        let path = self.activity_log_path();
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(path)
    }

    /// Named entry from `testCommands`, defaulting to a disabled command
    pub fn test_command(&self, name: &str) -> TestCommandConfig {
        self.test_commands
            .get(name)
            .cloned()
            .unwrap_or_default()
    }
}

/// Resolve the plugin root directory.
///
/// The host exports `CLAUDE_PLUGIN_ROOT` to plugin processes; outside of the
/// host the binary's grandparent directory stands in (binaries are installed
/// under `<plugin root>/bin/`), falling back to `~/.claude`.
pub fn plugin_root() -> PathBuf {
    if let Ok(root) = env::var("CLAUDE_PLUGIN_ROOT") {
        if !root.is_empty() {
            return PathBuf::from(root);
        }
    }

    if let Some(root) = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().and_then(|p| p.parent()).map(PathBuf::from))
    {
        return root;
    }

    dirs::home_dir()
        .map(|home| home.join(".claude"))
        .unwrap_or_else(|| PathBuf::from("."))
}

// ============================================================================
// Tests
// ============================================================================
