//! OpenAI-compatible chat completions backend
//!
//! Works against OpenAI, Groq, Ollama or any service exposing
//! `POST {base_url}/chat/completions`.

use crate::generation::{GenerationError, GeneratorConfig, TextGenerator};
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Chat completions client for a single model
pub struct OpenAiGenerator {
    client: Client,
    config: GeneratorConfig,
    api_key: Option<String>,
}

impl OpenAiGenerator {
    /// Create a backend from configuration, reading the API key from the environment
    pub fn new(config: GeneratorConfig) -> Result<Self, GenerationError> {
        let api_key = config.resolve_api_key();
        if api_key.is_none() {
            warn!(
                "{} not set; requests to {} will be sent without authentication",
                config.api_key_env, config.base_url
            );
        }
        Self::with_api_key(config, api_key)
    }

    /// Create a backend with an explicit API key
    pub fn with_api_key(
        config: GeneratorConfig,
        api_key: Option<String>,
    ) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerationError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn add_headers(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder.header(header::CONTENT_TYPE, "application/json");

        if let Some(ref api_key) = self.api_key {
            builder.header(header::AUTHORIZATION, format!("Bearer {}", api_key))
        } else {
            builder
        }
    }

    fn classify_status(status: StatusCode, body: &str) -> GenerationError {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.trim().to_string());

        match status.as_u16() {
            401 | 403 => GenerationError::Auth(message),
            429 => GenerationError::RateLimited(message),
            _ => GenerationError::Api(format!("HTTP {}: {}", status, message)),
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending chat completion request"
        );

        let response = self
            .add_headers(self.client.post(self.completions_url()))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout(self.config.timeout_secs)
                } else {
                    GenerationError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        if !status.is_success() {
            warn!("Chat completion failed with {}", status);
            return Err(Self::classify_status(status, &body));
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| GenerationError::Malformed(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::Malformed("response has no choices".to_string()))?
            .message
            .content
            .unwrap_or_default();

        debug!("Chat completion returned {} bytes", content.len());

        Ok(content.trim().to_string())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}
