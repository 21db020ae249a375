//! Test utility functions for textflow

use crate::mock_generator::MockGenerator;
use std::sync::Arc;
use textflow::core::config::PipelineConfig;
use textflow::{Error, ExecutionEngine, ExecutionStatus, PipelineExecution, Step};

/// Parse the steps of a pipeline YAML document
pub fn steps_from_yaml(yaml: &str) -> Vec<Step> {
    PipelineConfig::from_yaml(yaml)
        .expect("pipeline YAML should parse")
        .steps
}

/// Run `steps` over `input` with a shared mock generator
pub async fn run_with_mock(
    mock: &Arc<MockGenerator>,
    steps: &[Step],
    input: &str,
) -> Result<PipelineExecution, Error> {
    ExecutionEngine::new(Arc::clone(mock))
        .execute(steps, input)
        .await
}

/// Assert the pipeline completed successfully
pub fn assert_pipeline_completed(execution: &PipelineExecution) {
    assert_eq!(
        execution.status,
        ExecutionStatus::Completed,
        "expected pipeline to complete, outputs: {:?}",
        execution.outputs
    );
}

/// Assert outcomes match `(step_id, output)` pairs, in order
pub fn assert_outputs(execution: &PipelineExecution, expected: &[(&str, &str)]) {
    let actual: Vec<(&str, &str)> = execution
        .outputs
        .iter()
        .map(|o| (o.step_id.as_str(), o.output.as_str()))
        .collect();
    assert_eq!(actual, expected);
}

/// Assert the run failed at `step_id`, returning the failed record
pub fn assert_failed_at<'a>(error: &'a Error, step_id: &str) -> &'a PipelineExecution {
    assert_eq!(error.failed_step(), Some(step_id), "unexpected error: {}", error);
    let execution = error
        .execution()
        .expect("step failure should carry the execution record");
    assert_eq!(execution.status, ExecutionStatus::Failed);
    execution
}
