//! Mock generator for deterministic, fast scenario tests

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use textflow::generation::{GenerationError, TextGenerator};

type Transform = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Mock generator that returns predefined responses
///
/// This is useful for:
/// - Testing step chaining (each prompt is derived from the previous output)
/// - Checking exactly which prompts reached the backend
/// - Simulating backend failures and empty responses
pub struct MockGenerator {
    script: Mutex<VecDeque<Result<String, GenerationError>>>,
    transform: Option<Transform>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl MockGenerator {
    /// Create a mock that answers with `responses`, in order
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: Mutex::new(responses.into_iter().map(|r| Ok(r.into())).collect()),
            transform: None,
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    /// Create a mock whose answer is computed from the prompt
    pub fn transforming<F>(transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            script: Mutex::new(VecDeque::new()),
            transform: Some(Box::new(transform)),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    /// Queue a failure after the responses already scripted
    pub fn then_fail(self, error: GenerationError) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    /// Sleep this long before answering each call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Share the mock so a test can inspect it after handing it to an engine
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Number of generate calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every prompt received, in order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(transform) = &self.transform {
            return Ok(transform(prompt));
        }

        self.script.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(GenerationError::Internal(format!(
                "MockGenerator: No response available for request {}",
                call + 1
            )))
        })
    }
}

/// The text a step prompt asks the model to work on
pub fn embedded_text(prompt: &str) -> &str {
    let start = prompt.find(":\n\"").map(|i| i + 3).unwrap_or(0);
    let end = prompt
        .rfind("\"\n\nPlease provide")
        .filter(|&end| end >= start)
        .unwrap_or(prompt.len());
    &prompt[start..end]
}
