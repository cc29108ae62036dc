//! Regex-heuristic prompt classification.
//!
//! Decides whether a user request is a coding task worth delegating to an
//! autonomous subagent or a quick question to answer directly. Multi-request
//! prompts are split and classified per request.

use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::AutodevError;

// ============================================================================
// TaskType
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskType {
    CodingTask,
    QuickQuestion,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CodingTask => "CODING_TASK",
            Self::QuickQuestion => "QUICK_QUESTION",
        }
    }

    /// Short label used in multi-request task lists
    pub fn label(&self) -> &'static str {
        match self {
            Self::CodingTask => "CODING",
            Self::QuickQuestion => "QUICK",
        }
    }
}

impl FromStr for TaskType {
    type Err = AutodevError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CODING_TASK" => Ok(Self::CodingTask),
            "QUICK_QUESTION" => Ok(Self::QuickQuestion),
            _ => Err(AutodevError::InvalidTaskType(s.to_string())),
        }
    }
}

// ============================================================================
// Pattern sets
// ============================================================================

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("hardcoded pattern compiles"))
        .collect()
}

/// Patterns indicating quick questions (no coding needed)
fn quick_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            compile(&[
                r"(?i)^(how|what|why|when|where|who|can you|could you|do you|does|is|are)\b.*\?$",
                r"(?i)\b(explain|describe|tell me about|what is|what are)\b",
                r"(?i)\b(commit|push|pull|merge|readme|doc|documentation)\b",
                r"(?i)^(yes|no|ok|thanks|thank you|great|good|perfect|sure|got it)\b",
                r"(?i)^(show|list|find|search|grep|where is)\b",
                r"(?i)^(hello|hi|hey|greetings)\b",
            ])
        })
        .as_slice()
}

/// Patterns indicating coding tasks that should use a subagent
fn coding_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            compile(&[
                // Action verb + coding target
                r"(?i)\b(implement|create|build|add|fix|refactor|update|change|modify|write|delete|remove|rename|migrate|upgrade)\b.{0,30}\b(function|class|component|feature|bug|code|file|module|test|api|endpoint|page|hook|system|logic|method|service|handler|route|controller|model|schema|validation|form|button|modal|dialog|login|auth|authentication|database|query|table|view|style|css|layout|ui|interface|type|types|config|setting)\b",
                r"(?i)\b(develop|program|code up|build out)\b",
                r"(?i)\b(new feature|add feature|implement feature)\b",
                r"(?i)\b(fix the|fix this|debug|resolve)\b.{0,20}\b(bug|error|issue|problem)\b",
                r"(?i)\b(delete|remove)\b.{0,20}\b(old|deprecated|unused)\b",
                r"(?i)\b(rename|move)\b.{0,20}\b(to|into|from)\b",
                // Standalone coding action verbs
                r"(?i)^(implement|create|build|add|fix|refactor)\b",
            ])
        })
        .as_slice()
}

/// Explicit subagent request, e.g. "subagent: add retry logic"
fn subagent_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\bsubagent:\s").expect("hardcoded pattern compiles"))
}

/// Line prefixes that start a new request: "1. ", "a) ", "- ", "* ", "• "
fn explicit_delimiters() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            compile(&[
                r"^\s*\d+\.\s+",
                r"^\s*\d+\)\s+",
                r"(?i)^\s*[a-z]\.\s+",
                r"(?i)^\s*[a-z]\)\s+",
                r"^\s*-\s+",
                r"^\s*\*\s+",
                r"^\s*•\s+",
            ])
        })
        .as_slice()
}

/// Prose separators between requests in a single paragraph
fn implicit_separators() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            compile(&[
                r"(?i)\.\s+(?:then|also|next|after that|finally|lastly)\s+",
                r"(?i)\s+(?:and also|and then|, then|; also)\s+",
            ])
        })
        .as_slice()
}

// ============================================================================
// Classification
// ============================================================================

/// Split a prompt into individual requests.
///
/// Lines starting with an explicit delimiter each open a new request;
/// continuation lines are joined onto the current one. When no explicit
/// structure is found, prose separators are tried over the whole text.
pub fn split_requests(prompt: &str) -> Vec<String> {
    let trimmed = prompt.trim();
    let lines: Vec<&str> = trimmed.split('\n').collect();

    let mut requests: Vec<String> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut has_delimiters = false;

    for line in &lines {
        let stripped = line.trim();
        if stripped.is_empty() {
            continue;
        }

        let is_delimiter_line = explicit_delimiters().iter().any(|re| re.is_match(stripped));

        if is_delimiter_line {
            has_delimiters = true;
            if !current.is_empty() {
                requests.push(current.join(" "));
            }
            let mut cleaned = stripped.to_string();
            for re in explicit_delimiters() {
                cleaned = re.replace(&cleaned, "").into_owned();
            }
            current = vec![cleaned.trim().to_string()];
        } else {
            current.push(stripped.to_string());
        }
    }

    if !current.is_empty() {
        requests.push(current.join(" "));
    }

    if has_delimiters && requests.len() > 1 {
        return requests
            .into_iter()
            .filter(|r| !r.trim().is_empty())
            .collect();
    }

    let full_text = lines.join(" ");
    for separator in implicit_separators() {
        let parts: Vec<&str> = separator.split(&full_text).collect();
        if parts.len() > 1 {
            return parts
                .iter()
                .map(|p| p.trim())
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect();
        }
    }

    vec![trimmed.to_string()]
}

/// Classify a single request.
pub fn classify_single(request: &str) -> TaskType {
    let lower = request.to_lowercase().trim().to_string();

    if subagent_pattern().is_match(&lower) {
        return TaskType::CodingTask;
    }

    if coding_patterns().iter().any(|re| re.is_match(&lower)) {
        return TaskType::CodingTask;
    }

    if quick_patterns().iter().any(|re| re.is_match(&lower)) {
        return TaskType::QuickQuestion;
    }

    TaskType::QuickQuestion
}

/// Classify a prompt, handling multi-request prompts.
///
/// The overall type is CodingTask if any individual request is one.
pub fn classify_prompt(prompt: &str) -> (TaskType, Vec<(String, TaskType)>) {
    let requests = split_requests(prompt);

    let classified: Vec<(String, TaskType)> = requests
        .into_iter()
        .map(|request| {
            let task_type = classify_single(&request);
            (request, task_type)
        })
        .collect();

    let overall = if classified.iter().any(|(_, t)| *t == TaskType::CodingTask) {
        TaskType::CodingTask
    } else {
        TaskType::QuickQuestion
    };

    (overall, classified)
}

/// Truncate text for display, char-safe.
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_len.saturating_sub(3)).collect();
    truncated.push_str("...");
    truncated
}

// ============================================================================
// Tests
// ============================================================================
