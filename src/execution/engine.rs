//! Main execution engine - orchestrates the entire pipeline run

use crate::{
    core::{Error, ExecutionStatus, PipelineExecution, Result, Step, StepOutcome},
    execution::StepExecutor,
    generation::TextGenerator,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};
use uuid::Uuid;

/// Events that can occur during pipeline execution
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionEvent {
    PipelineStarted {
        execution_id: Uuid,
        step_count: usize,
    },
    StepStarted {
        step_id: String,
        /// Zero-based position in the pipeline
        index: usize,
    },
    StepCompleted {
        step_id: String,
        output: String,
        processing_time_ms: u64,
    },
    StepFailed {
        step_id: String,
        error: String,
    },
    PipelineCompleted {
        execution_id: Uuid,
        status: ExecutionStatus,
        total_processing_time_ms: u64,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(&ExecutionEvent) + Send + Sync>;

/// Main pipeline execution engine
///
/// Steps run strictly in order; each step's output becomes the next
/// step's input.
pub struct ExecutionEngine<G> {
    executor: StepExecutor<G>,
    event_handlers: Vec<EventHandler>,
}

impl<G: TextGenerator> ExecutionEngine<G> {
    pub fn new(generator: G) -> Self {
        Self {
            executor: StepExecutor::new(generator),
            event_handlers: Vec::new(),
        }
    }

    /// Add an event handler
    pub fn with_event_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&ExecutionEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
        self
    }

    /// Emit an event to all handlers
    fn emit_event(&self, event: ExecutionEvent) {
        for handler in &self.event_handlers {
            handler(&event);
        }
    }

    /// Execute the entire pipeline against one input
    ///
    /// # Errors
    /// - [`Error::EmptyPipeline`] if `steps` is empty
    /// - [`Error::EmptyInput`] if `input` is blank
    /// - [`Error::StepFailed`] on the first failing step; the error carries
    ///   the failed execution record with the outcomes gathered so far
    pub async fn execute(&self, steps: &[Step], input: &str) -> Result<PipelineExecution> {
        if steps.is_empty() {
            return Err(Error::EmptyPipeline);
        }
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyInput);
        }

        let started = Instant::now();
        let mut execution = PipelineExecution::start(input);
        let execution_id = execution.execution_id;

        info!(
            "Starting pipeline execution {} with {} steps",
            execution_id,
            steps.len()
        );
        self.emit_event(ExecutionEvent::PipelineStarted {
            execution_id,
            step_count: steps.len(),
        });

        let mut current_input = trimmed.to_string();

        for (index, step) in steps.iter().enumerate() {
            self.emit_event(ExecutionEvent::StepStarted {
                step_id: step.id.clone(),
                index,
            });

            let step_started = Instant::now();
            match self.executor.execute(step, &current_input).await {
                Ok(output) => {
                    let processing_time_ms = elapsed_ms(step_started);
                    self.emit_event(ExecutionEvent::StepCompleted {
                        step_id: step.id.clone(),
                        output: output.clone(),
                        processing_time_ms,
                    });
                    execution.record(StepOutcome {
                        step_id: step.id.clone(),
                        output: output.clone(),
                        processing_time_ms,
                    });
                    current_input = output;
                }
                Err(e) => {
                    error!("Step {} failed: {}", step.id, e);
                    self.emit_event(ExecutionEvent::StepFailed {
                        step_id: step.id.clone(),
                        error: e.to_string(),
                    });

                    execution.fail(elapsed_ms(started));
                    self.finish(&execution);

                    return Err(Error::StepFailed {
                        step_id: step.id.clone(),
                        source: Box::new(e),
                        execution: Box::new(execution),
                    });
                }
            }
        }

        execution.complete(elapsed_ms(started));
        self.finish(&execution);

        Ok(execution)
    }

    fn finish(&self, execution: &PipelineExecution) {
        info!(
            "Pipeline execution {} finished: {:?} in {}ms",
            execution.execution_id, execution.status, execution.total_processing_time_ms
        );
        self.emit_event(ExecutionEvent::PipelineCompleted {
            execution_id: execution.execution_id,
            status: execution.status,
            total_processing_time_ms: execution.total_processing_time_ms,
        });
    }
}

fn elapsed_ms(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
}
