//! Execution state models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Overall pipeline execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    /// Pipeline is currently running
    Running,
    /// Every step succeeded
    Completed,
    /// A step failed and the run was stopped
    Failed,
}

impl ExecutionStatus {
    /// Check if the status can no longer change
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExecutionStatus::Completed | ExecutionStatus::Failed)
    }
}

/// Result of one successfully executed step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepOutcome {
    pub step_id: String,
    pub output: String,
    pub processing_time_ms: u64,
}

/// Record of one pipeline run against one input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineExecution {
    /// Unique execution ID
    pub execution_id: Uuid,

    /// The input exactly as supplied by the caller
    pub input: String,

    /// Outcomes in execution order
    pub outputs: Vec<StepOutcome>,

    /// Wall time for the whole run
    pub total_processing_time_ms: u64,

    pub status: ExecutionStatus,

    /// When execution started
    pub created_at: DateTime<Utc>,
}

impl PipelineExecution {
    /// Create a new execution in the running state
    pub fn start(input: impl Into<String>) -> Self {
        Self {
            execution_id: Uuid::new_v4(),
            input: input.into(),
            outputs: Vec::new(),
            total_processing_time_ms: 0,
            status: ExecutionStatus::Running,
            created_at: Utc::now(),
        }
    }

    pub(crate) fn record(&mut self, outcome: StepOutcome) {
        debug_assert_eq!(self.status, ExecutionStatus::Running);
        self.outputs.push(outcome);
    }

    pub(crate) fn complete(&mut self, total_processing_time_ms: u64) {
        self.status = ExecutionStatus::Completed;
        self.total_processing_time_ms = total_processing_time_ms;
    }

    pub(crate) fn fail(&mut self, total_processing_time_ms: u64) {
        self.status = ExecutionStatus::Failed;
        self.total_processing_time_ms = total_processing_time_ms;
    }

    /// Output of the last successful step
    pub fn final_output(&self) -> Option<&str> {
        self.outputs.last().map(|o| o.output.as_str())
    }

    /// Output of a specific step
    pub fn output_of(&self, step_id: &str) -> Option<&str> {
        self.outputs
            .iter()
            .find(|o| o.step_id == step_id)
            .map(|o| o.output.as_str())
    }
}
