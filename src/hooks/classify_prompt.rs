//! UserPromptSubmit hook: classify the prompt to guide Claude's behavior.
//!
//! Emits context on stdout telling Claude whether to delegate to the 'coder'
//! subagent or answer directly. Multi-request prompts get a per-request task
//! list plus execution guidance. Must never fail: on any problem it emits an
//! advisory marker and approves.

use crate::activity;
use crate::classifier::{classify_prompt, truncate, TaskType};
use crate::config::PluginConfig;

use super::{debug, HookInput, HookOutput};

const HOOK_NAME: &str = "classify-prompt";

/// Handle the classify-prompt hook.
///
/// Takes the raw stdin payload so a malformed one can be answered with a
/// classification-error marker instead of a process failure.
pub async fn handle_classify_prompt(raw: &str, config: &PluginConfig) -> HookOutput {
    let input = match HookInput::from_json(raw) {
        Ok(input) => input,
        Err(e) => {
            println!(
                "[CLASSIFICATION_ERROR: JSON parse failed - {}] Use your own judgment.",
                e
            );
            return HookOutput::approve();
        }
    };

    let prompt = input.prompt.unwrap_or_default();
    if prompt.trim().is_empty() {
        println!("[CLASSIFICATION_SKIPPED: Empty prompt] Use your own judgment.");
        return HookOutput::approve();
    }

    let (overall, classified) = classify_prompt(&prompt);

    let coding_count = classified
        .iter()
        .filter(|(_, t)| *t == TaskType::CodingTask)
        .count();
    let quick_count = classified.len() - coding_count;

    debug::debug(
        HOOK_NAME,
        &format!(
            "classified {} request(s) as {}",
            classified.len(),
            overall.as_str()
        ),
    );

    activity::log_prompt_classification(
        config,
        &prompt,
        overall.as_str(),
        classified.len(),
        coding_count,
        quick_count,
    );

    println!("{}", build_context(overall, &classified, coding_count, quick_count));
    HookOutput::approve()
}

/// Build the context block injected into the conversation.
fn build_context(
    overall: TaskType,
    classified: &[(String, TaskType)],
    coding_count: usize,
    quick_count: usize,
) -> String {
    if classified.len() == 1 {
        return match overall {
            TaskType::CodingTask => {
                "[TASK_TYPE: CODING_TASK] This appears to be a coding task. \
                 Consider using the 'coder' subagent for autonomous implementation \
                 with test verification."
                    .to_string()
            }
            TaskType::QuickQuestion => {
                "[TASK_TYPE: QUICK_QUESTION] This is a quick question or simple task. \
                 Answer directly without spawning subagents."
                    .to_string()
            }
        };
    }

    let mut lines = vec![format!(
        "[MULTI_REQUEST: {} tasks detected ({} coding, {} quick)]",
        classified.len(),
        coding_count,
        quick_count
    )];
    lines.push("Tasks to handle:".to_string());

    for (i, (request, task_type)) in classified.iter().enumerate() {
        lines.push(format!(
            "  {}. [{}] {}",
            i + 1,
            task_type.label(),
            truncate(request, 60)
        ));
    }

    lines.push(String::new());
    lines.push("Execution guidance:".to_string());
    if coding_count > 1 {
        lines.push(
            "- PARALLEL: Launch multiple 'coder' subagents in parallel for independent CODING tasks"
                .to_string(),
        );
    } else if coding_count == 1 {
        lines.push("- Use 'coder' subagent for the CODING task".to_string());
    }
    if quick_count > 0 {
        lines.push(
            "- Answer QUICK tasks directly (can be done while agents run in background)".to_string(),
        );
    }
    if coding_count > 0 && quick_count > 0 {
        lines.push(
            "- Consider running CODING tasks in background while answering QUICK tasks".to_string(),
        );
    }

    lines.join("\n")
}
