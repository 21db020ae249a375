//! textflow - chain AI text transformations into pipelines

pub mod cli;
pub mod core;
pub mod execution;
pub mod generation;
pub mod synthesis;

// Re-export commonly used types
pub use crate::core::{
    Error, ExecutionStatus, LanguageRegistry, PipelineExecution, Result, Step, StepKind,
    StepOutcome, StepType,
};
pub use execution::{ExecutionEngine, ExecutionEvent, StepExecutor};
pub use generation::{GenerationError, GeneratorConfig, TextGenerator};
pub use synthesis::PipelineSynthesizer;

/// Run `steps` over `input` with a fresh engine
pub async fn execute_pipeline<G: TextGenerator>(
    generator: G,
    steps: &[Step],
    input: &str,
) -> Result<PipelineExecution> {
    ExecutionEngine::new(generator).execute(steps, input).await
}

/// Synthesize a step list from a free-text instruction
pub async fn generate_steps<G: TextGenerator>(generator: G, instruction: &str) -> Result<Vec<Step>> {
    PipelineSynthesizer::new(generator).generate_steps(instruction).await
}
