//! Pipeline configuration from YAML

use crate::core::{language::LanguageRegistry, step::Step};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Top-level pipeline definition loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Pipeline name
    pub name: String,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Default input used when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,

    /// Pipeline steps, in execution order
    pub steps: Vec<Step>,
}

impl PipelineConfig {
    pub fn new(name: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            name: name.into(),
            description: None,
            input: None,
            steps,
        }
    }

    /// Load pipeline configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read pipeline file {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse pipeline configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: PipelineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the pipeline configuration
    pub fn validate(&self) -> Result<()> {
        let mut seen_ids = HashSet::new();
        for step in &self.steps {
            if step.id.trim().is_empty() {
                anyhow::bail!("Step ID must not be empty");
            }
            if !seen_ids.insert(step.id.as_str()) {
                anyhow::bail!("Duplicate step ID: {}", step.id);
            }

            if let Some(language) = step.target_language() {
                if !LanguageRegistry::is_supported(language) {
                    anyhow::bail!(
                        "Step '{}' translates to restricted language '{}'",
                        step.id,
                        language
                    );
                }
            }
        }

        Ok(())
    }

    /// Serialize back to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write the pipeline to a YAML file
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_yaml()?)
            .with_context(|| format!("Failed to write pipeline file {}", path.display()))
    }
}
