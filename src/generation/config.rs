//! Generation backend configuration

use crate::generation::{CommandGenerator, GenerationError, OpenAiGenerator, TextGenerator};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Groq's OpenAI-compatible endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

pub const DEFAULT_MODEL: &str = "gemma2-9b-it";

pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";

/// Which kind of backend serves prompts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Any OpenAI-compatible chat completions API
    #[default]
    OpenAi,
    /// A local program that prints its answer to stdout
    Command,
}

/// Configuration for the generation backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub backend: BackendKind,

    /// Base URL of the chat completions API
    pub base_url: String,

    pub model: String,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Timeout for a single generation in seconds
    pub timeout_secs: u64,

    /// Program to run for the command backend
    pub command: Option<String>,

    /// Arguments passed before the prompt
    pub args: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::OpenAi,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: 120,
            command: None,
            args: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location (`<config dir>/textflow/config.yaml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("textflow").join("config.yaml"))
    }

    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: GeneratorConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, or from the default location if it exists
    ///
    /// An explicit path must exist; a missing default file means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::debug!("Loading generator config from {}", path.display());
                Self::from_file(path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than zero");
        }
        match self.backend {
            BackendKind::OpenAi => {
                if self.base_url.trim().is_empty() {
                    anyhow::bail!("base_url must not be empty for the openai backend");
                }
                if self.model.trim().is_empty() {
                    anyhow::bail!("model must not be empty for the openai backend");
                }
            }
            BackendKind::Command => {
                if self.command.as_deref().map_or(true, |c| c.trim().is_empty()) {
                    anyhow::bail!("command backend requires `command`");
                }
            }
        }
        Ok(())
    }

    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_key_env(mut self, api_key_env: impl Into<String>) -> Self {
        self.api_key_env = api_key_env.into();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_command(mut self, command: impl Into<String>, args: Vec<String>) -> Self {
        self.command = Some(command.into());
        self.args = args;
        self
    }

    /// Read the API key from the configured environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    /// Construct the configured backend
    pub fn build(&self) -> std::result::Result<Arc<dyn TextGenerator>, GenerationError> {
        match self.backend {
            BackendKind::OpenAi => Ok(Arc::new(OpenAiGenerator::new(self.clone())?)),
            BackendKind::Command => {
                let program = self.command.clone().ok_or_else(|| {
                    GenerationError::Internal("command backend requires `command`".to_string())
                })?;
                Ok(Arc::new(CommandGenerator::new(
                    program,
                    self.args.clone(),
                    self.timeout_secs,
                )))
            }
        }
    }
}
