//! Command backend - runs a local program that prints generated text

use crate::generation::{GenerationError, TextGenerator};
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Generator that executes a program as a subprocess
///
/// The prompt is passed as the last argument; stdout is the answer.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    /// Program to execute
    program: String,

    /// Arguments passed before the prompt
    args: Vec<String>,

    /// Timeout for command execution in seconds
    timeout_secs: u64,
}

impl CommandGenerator {
    /// Create a new command generator
    ///
    /// # Arguments
    /// * `program` - Program name or path (e.g., "llm", "/usr/local/bin/ollama")
    /// * `args` - Fixed arguments placed before the prompt
    /// * `timeout_secs` - Timeout for command execution in seconds
    pub fn new(program: String, args: Vec<String>, timeout_secs: u64) -> Self {
        Self {
            program,
            args,
            timeout_secs,
        }
    }
}

#[async_trait]
impl TextGenerator for CommandGenerator {
    /// # Errors
    /// Returns `GenerationError` if:
    /// - The program cannot be spawned
    /// - It exits with a non-zero status
    /// - The output is not valid UTF-8
    /// - The command times out
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        debug!(
            "Spawning {} with prompt length: {}",
            self.program,
            prompt.len()
        );

        let result = timeout(
            Duration::from_secs(self.timeout_secs),
            Command::new(&self.program)
                .args(&self.args)
                .arg(prompt)
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| GenerationError::Timeout(self.timeout_secs))?;

        let output = result.map_err(|e| {
            GenerationError::Internal(format!("Failed to execute {}: {}", self.program, e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let exit_code = output.status.code().unwrap_or(-1);
            warn!(
                "{} exited with code {}: {}",
                self.program,
                exit_code,
                stderr.trim()
            );
            return Err(GenerationError::Api(format!(
                "{} exited with code {}: {}",
                self.program,
                exit_code,
                stderr.trim()
            )));
        }

        let content = String::from_utf8(output.stdout).map_err(|e| {
            GenerationError::Malformed(format!("Failed to decode {} output: {}", self.program, e))
        })?;

        debug!("{} returned {} bytes of output", self.program, content.len());

        Ok(content.trim().to_string())
    }
}
