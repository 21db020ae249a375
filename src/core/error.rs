//! Error types for pipeline execution and synthesis

use crate::core::{state::PipelineExecution, step::StepType};
use crate::generation::GenerationError;
use thiserror::Error;

/// Result type alias using the crate error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while executing or synthesizing a pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// A translate step names a language outside the allow-list
    #[error("the language \"{language}\" is restricted; choose one of the supported languages")]
    RestrictedLanguage { language: String },

    /// The backend answered with nothing but whitespace
    #[error("{step_type} step received an empty response from the generation backend")]
    EmptyGeneration { step_type: StepType },

    #[error("pipeline has no steps")]
    EmptyPipeline,

    #[error("pipeline input is empty")]
    EmptyInput,

    #[error("instruction is empty")]
    EmptyInstruction,

    /// The synthesized step list failed to parse or validate
    #[error("synthesized pipeline is invalid: {reason}")]
    InvalidSynthesis { reason: String },

    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// A step failed; the run was stopped at this step
    #[error("step '{step_id}' failed: {source}")]
    StepFailed {
        step_id: String,
        #[source]
        source: Box<Error>,
        /// The failed run, with outcomes of the steps before `step_id`
        execution: Box<PipelineExecution>,
    },
}

impl Error {
    pub(crate) fn invalid_synthesis(reason: impl Into<String>) -> Self {
        Error::InvalidSynthesis {
            reason: reason.into(),
        }
    }

    /// The underlying error, with step context stripped
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::StepFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// The failed execution record, when the error came from a running pipeline
    pub fn execution(&self) -> Option<&PipelineExecution> {
        match self {
            Error::StepFailed { execution, .. } => Some(execution.as_ref()),
            _ => None,
        }
    }

    /// ID of the step that failed, if any
    pub fn failed_step(&self) -> Option<&str> {
        match self {
            Error::StepFailed { step_id, .. } => Some(step_id.as_str()),
            _ => None,
        }
    }

    /// Whether the caller can fix this by changing the text or language it sent
    ///
    /// An empty pipeline is a caller-side programming error and does not count.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self.root_cause(),
            Error::RestrictedLanguage { .. } | Error::EmptyInput | Error::EmptyInstruction
        )
    }
}
