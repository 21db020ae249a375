//! CLI output formatting

use crate::{
    core::{Error, ExecutionStatus, PipelineExecution},
    execution::ExecutionEvent,
};
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{json, Value};
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "! ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Create a spinner shown while waiting on the backend
pub fn create_spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Format an execution status for display
pub fn format_status(status: ExecutionStatus) -> String {
    match status {
        ExecutionStatus::Running => style("RUNNING").yellow().to_string(),
        ExecutionStatus::Completed => style("COMPLETED").green().to_string(),
        ExecutionStatus::Failed => style("FAILED").red().to_string(),
    }
}

/// Format an execution event for display
pub fn format_execution_event(event: &ExecutionEvent) -> String {
    match event {
        ExecutionEvent::PipelineStarted {
            execution_id,
            step_count,
        } => format!(
            "{} Starting pipeline with {} steps ({})",
            ROCKET,
            style(step_count).bold(),
            style(short_id(execution_id)).dim()
        ),
        ExecutionEvent::StepStarted { step_id, index } => {
            format!("{} [{}] {}", SPINNER, index + 1, style(step_id).cyan())
        }
        ExecutionEvent::StepCompleted {
            step_id,
            processing_time_ms,
            ..
        } => format!(
            "{} {} {}",
            CHECK,
            style(step_id).green(),
            style(format!("({}ms)", processing_time_ms)).dim()
        ),
        ExecutionEvent::StepFailed { step_id, error } => {
            format!("{} {}: {}", CROSS, style(step_id).red(), style(error).dim())
        }
        ExecutionEvent::PipelineCompleted {
            execution_id,
            status,
            total_processing_time_ms,
        } => format!(
            "{} Pipeline ({}) {} in {}ms",
            INFO,
            style(short_id(execution_id)).dim(),
            format_status(*status),
            total_processing_time_ms
        ),
    }
}

/// Print every recorded outcome of an execution
pub fn format_execution(execution: &PipelineExecution, max_lines: usize) -> String {
    let mut out = String::new();
    for outcome in &execution.outputs {
        out.push_str(&format!(
            "{} {}\n{}\n\n",
            style("▸").cyan(),
            style(&outcome.step_id).bold(),
            format_output(&outcome.output, max_lines)
        ));
    }
    out.push_str(&format!(
        "Status: {}  Total: {}ms",
        format_status(execution.status),
        execution.total_processing_time_ms
    ));
    out
}

/// Format step output with truncation
pub fn format_output(output: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = output.lines().collect();

    if lines.len() <= max_lines {
        output.to_string()
    } else {
        let truncated = lines[..max_lines].join("\n");
        format!(
            "{}\n{}... ({} more lines)",
            truncated,
            style("[truncated]").dim(),
            lines.len() - max_lines
        )
    }
}

/// Render a failed run as one JSON document
///
/// The partial execution record, when there is one, gains `error` and
/// `failedStep` fields; otherwise the document holds just the error.
pub fn format_failure_json(error: &Error) -> serde_json::Result<String> {
    let mut document = match error.execution() {
        Some(execution) => serde_json::to_value(execution)?,
        None => json!({}),
    };
    if let Value::Object(fields) = &mut document {
        fields.insert("error".to_string(), Value::String(error.to_string()));
        if let Some(step_id) = error.failed_step() {
            fields.insert("failedStep".to_string(), Value::String(step_id.to_string()));
        }
    }
    serde_json::to_string_pretty(&document)
}

fn short_id(id: &uuid::Uuid) -> String {
    id.to_string().chars().take(8).collect()
}
