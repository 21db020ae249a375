//! Text-generation backends
//!
//! The pipeline only ever needs one capability from a model: turn a prompt
//! into text. [`TextGenerator`] is that seam; everything behind it (HTTP API,
//! local CLI, test double) is interchangeable.

pub mod command;
pub mod config;
pub mod error;
pub mod openai;

use async_trait::async_trait;
use std::sync::Arc;

pub use command::CommandGenerator;
pub use config::{BackendKind, GeneratorConfig};
pub use error::GenerationError;
pub use openai::OpenAiGenerator;

/// Trait for text generation - allows for different implementations
///
/// A call is single-shot: no retries, no streaming, no partial output.
/// Implementations return the trimmed generated text, or an error.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a prompt
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Arc<T> {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        (**self).generate(prompt).await
    }
}
