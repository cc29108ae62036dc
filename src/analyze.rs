//! Activity log analytics.
//!
//! Reduces the JSONL activity log to usage metrics and renders the
//! human-readable report for the `analyze` command.

use chrono::{DateTime, Timelike, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::activity::ActivityEntry;

#[derive(Debug, Default, Serialize)]
pub struct ActivityMetrics {
    pub total_events: usize,
    pub date_range: DateRange,
    pub prompts: PromptMetrics,
    pub subagent_stops: SubagentMetrics,
    pub session_stops: SessionStopMetrics,
    pub by_day: BTreeMap<String, DayCounts>,
    pub by_hour: BTreeMap<u32, u64>,
}

#[derive(Debug, Default, Serialize)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct PromptMetrics {
    pub total: u64,
    pub coding_tasks: u64,
    pub quick_questions: u64,
    pub multi_request: u64,
}

#[derive(Debug, Default, Serialize)]
pub struct SubagentMetrics {
    pub total: u64,
    pub passed: u64,
    pub blocked: u64,
    pub backend_failures: u64,
    pub frontend_failures: u64,
}

#[derive(Debug, Default, Serialize)]
pub struct SessionStopMetrics {
    pub total: u64,
    pub with_code_changes: u64,
    pub without_code_changes: u64,
    pub tests_run: u64,
    pub tests_passed: u64,
    pub tests_failed: u64,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct DayCounts {
    pub prompts: u64,
    pub subagent_stops: u64,
    pub session_stops: u64,
}

fn is_true(value: &serde_json::Value) -> bool {
    value.as_bool().unwrap_or(false)
}

fn is_false(value: &serde_json::Value) -> bool {
    value.as_bool() == Some(false)
}

/// Compute metrics over activity log entries.
pub fn analyze_entries(entries: &[ActivityEntry]) -> ActivityMetrics {
    let mut metrics = ActivityMetrics {
        total_events: entries.len(),
        ..Default::default()
    };

    let mut start: Option<DateTime<Utc>> = None;
    let mut end: Option<DateTime<Utc>> = None;

    for entry in entries {
        let day_key = entry.timestamp.format("%Y-%m-%d").to_string();
        let hour_key = entry.timestamp.hour();

        if start.map_or(true, |s| entry.timestamp < s) {
            start = Some(entry.timestamp);
        }
        if end.map_or(true, |e| entry.timestamp > e) {
            end = Some(entry.timestamp);
        }

        let data = &entry.data;

        match entry.event_type.as_str() {
            "prompt_classification" => {
                metrics.prompts.total += 1;
                metrics.by_day.entry(day_key).or_default().prompts += 1;
                *metrics.by_hour.entry(hour_key).or_default() += 1;

                if data["classification"] == "CODING_TASK" {
                    metrics.prompts.coding_tasks += 1;
                } else {
                    metrics.prompts.quick_questions += 1;
                }

                if is_true(&data["is_multi_request"]) {
                    metrics.prompts.multi_request += 1;
                }
            }

            "subagent_test_gate" => {
                metrics.subagent_stops.total += 1;
                metrics.by_day.entry(day_key).or_default().subagent_stops += 1;

                if is_true(&data["tests_passed"]) {
                    metrics.subagent_stops.passed += 1;
                }
                if is_true(&data["blocked"]) {
                    metrics.subagent_stops.blocked += 1;
                }
                if is_false(&data["backend_passed"]) {
                    metrics.subagent_stops.backend_failures += 1;
                }
                if is_false(&data["frontend_passed"]) {
                    metrics.subagent_stops.frontend_failures += 1;
                }
            }

            "session_stop" => {
                metrics.session_stops.total += 1;
                metrics.by_day.entry(day_key).or_default().session_stops += 1;

                if is_true(&data["code_modified"]) {
                    metrics.session_stops.with_code_changes += 1;
                } else {
                    metrics.session_stops.without_code_changes += 1;
                }

                if is_true(&data["tests_run"]) {
                    metrics.session_stops.tests_run += 1;
                    if is_true(&data["tests_passed"]) {
                        metrics.session_stops.tests_passed += 1;
                    } else {
                        metrics.session_stops.tests_failed += 1;
                    }
                }
            }

            _ => {}
        }
    }

    metrics.date_range.start = start.map(|t| t.to_rfc3339());
    metrics.date_range.end = end.map(|t| t.to_rfc3339());

    metrics
}

fn pct(count: u64, total: u64) -> f64 {
    count as f64 / total.max(1) as f64 * 100.0
}

/// Render the human-readable activity report.
pub fn render_report(metrics: &ActivityMetrics) -> String {
    let mut out = String::new();
    let banner = "=".repeat(60);
    let rule = "-".repeat(40);

    out.push_str(&banner);
    out.push('\n');
    out.push_str("AUTONOMOUS-DEV ACTIVITY REPORT\n");
    out.push_str(&banner);
    out.push_str("\n\n");

    if let (Some(start), Some(end)) = (&metrics.date_range.start, &metrics.date_range.end) {
        let start_day: String = start.chars().take(10).collect();
        let end_day: String = end.chars().take(10).collect();
        out.push_str(&format!("Date Range: {} to {}\n", start_day, end_day));
    }
    out.push_str(&format!("Total Events: {}\n\n", metrics.total_events));

    let p = &metrics.prompts;
    out.push_str("PROMPT CLASSIFICATION\n");
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!("  Total Prompts:      {}\n", p.total));
    out.push_str(&format!(
        "  Coding Tasks:       {} ({:.1}%)\n",
        p.coding_tasks,
        pct(p.coding_tasks, p.total)
    ));
    out.push_str(&format!(
        "  Quick Questions:    {} ({:.1}%)\n",
        p.quick_questions,
        pct(p.quick_questions, p.total)
    ));
    out.push_str(&format!("  Multi-Request:      {}\n\n", p.multi_request));

    let s = &metrics.subagent_stops;
    out.push_str("SUBAGENT TEST GATES\n");
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!("  Total Completions:  {}\n", s.total));
    out.push_str(&format!(
        "  Tests Passed:       {} ({:.1}%)\n",
        s.passed,
        pct(s.passed, s.total)
    ));
    out.push_str(&format!("  Blocked:            {}\n", s.blocked));
    out.push_str(&format!("  Backend Failures:   {}\n", s.backend_failures));
    out.push_str(&format!("  Frontend Failures:  {}\n\n", s.frontend_failures));

    let ss = &metrics.session_stops;
    out.push_str("SESSION STOPS\n");
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!("  Total Sessions:     {}\n", ss.total));
    out.push_str(&format!("  With Code Changes:  {}\n", ss.with_code_changes));
    out.push_str(&format!("  Without Changes:    {}\n", ss.without_code_changes));
    out.push_str(&format!("  Tests Run:          {}\n", ss.tests_run));
    out.push_str(&format!("  Tests Passed:       {}\n", ss.tests_passed));
    out.push_str(&format!("  Tests Failed:       {}\n\n", ss.tests_failed));

    if !metrics.by_hour.is_empty() {
        out.push_str("ACTIVITY BY HOUR\n");
        out.push_str(&rule);
        out.push('\n');
        for (hour, count) in &metrics.by_hour {
            let bar = "#".repeat((*count).min(30) as usize);
            out.push_str(&format!("  {:02}:00  {} ({})\n", hour, bar, count));
        }
        out.push('\n');
    }

    if !metrics.by_day.is_empty() {
        out.push_str("DAILY ACTIVITY (last 7 days)\n");
        out.push_str(&rule);
        out.push('\n');
        // The 7 most recent days, ascending
        let days: Vec<&String> = metrics.by_day.keys().rev().take(7).collect();
        for day in days.into_iter().rev() {
            let counts = &metrics.by_day[day];
            out.push_str(&format!(
                "  {}: {} prompts, {} subagents\n",
                day, counts.prompts, counts.subagent_stops
            ));
        }
    }

    out.push('\n');
    out.push_str(&banner);
    out.push('\n');

    out
}

// ============================================================================
// Tests
// ============================================================================
