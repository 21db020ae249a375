//! Step domain model

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single configured text transformation in a pipeline
///
/// On the wire a step keeps the shape callers and the generation backend
/// already speak: `{"id": "s1", "type": "translate", "config": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStep", into = "RawStep")]
pub struct Step {
    /// Caller-assigned identifier, unique within a pipeline
    pub id: String,

    /// What the step does, with its type-specific configuration
    pub kind: StepKind,
}

/// The operation a step performs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepKind {
    Summarize(SummarizeConfig),
    Translate(TranslateConfig),
    Rewrite(RewriteConfig),
    Extract(ExtractConfig),
}

/// Fieldless discriminant of [`StepKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepType {
    Summarize,
    Translate,
    Rewrite,
    Extract,
}

impl StepType {
    /// Every step type, in the order they are presented to users
    pub const ALL: [StepType; 4] = [
        StepType::Summarize,
        StepType::Translate,
        StepType::Rewrite,
        StepType::Extract,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepType::Summarize => "summarize",
            StepType::Translate => "translate",
            StepType::Rewrite => "rewrite",
            StepType::Extract => "extract",
        }
    }

    /// Look up a step type by its lowercase wire name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// One-line description of what the step does
    pub fn description(&self) -> &'static str {
        match self {
            StepType::Summarize => "Condense text into a concise summary",
            StepType::Translate => "Convert text to another language",
            StepType::Rewrite => "Adjust tone and style of text",
            StepType::Extract => "Extract key information from text",
        }
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary length
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl SummaryLength {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryLength::Short => "short",
            SummaryLength::Medium => "medium",
            SummaryLength::Long => "long",
        }
    }
}

/// Summary layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryFormat {
    #[default]
    Paragraph,
    Bullets,
    Outline,
}

impl SummaryFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryFormat::Paragraph => "paragraph",
            SummaryFormat::Bullets => "bullets",
            SummaryFormat::Outline => "outline",
        }
    }
}

/// Configuration for a summarize step
///
/// Absent fields stay `None` here; defaults are applied when the step runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<SummaryLength>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<SummaryFormat>,
}

/// Configuration for a translate step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
}

/// Configuration for a rewrite step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteConfig {
    /// Free-form style label, e.g. "casual"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

/// Configuration for an extract step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

impl Step {
    pub fn new(id: impl Into<String>, kind: StepKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// Summarize step with every option left at its default
    pub fn summarize(id: impl Into<String>) -> Self {
        Self::new(id, StepKind::Summarize(SummarizeConfig::default()))
    }

    pub fn translate(id: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self::new(
            id,
            StepKind::Translate(TranslateConfig {
                target_language: Some(target_language.into()),
            }),
        )
    }

    pub fn rewrite(id: impl Into<String>, style: impl Into<String>) -> Self {
        Self::new(
            id,
            StepKind::Rewrite(RewriteConfig {
                style: Some(style.into()),
            }),
        )
    }

    pub fn extract<I, S>(id: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            id,
            StepKind::Extract(ExtractConfig {
                keywords: keywords.into_iter().map(Into::into).collect(),
            }),
        )
    }

    pub fn step_type(&self) -> StepType {
        self.kind.step_type()
    }

    /// Target language named by a translate step, if any
    pub fn target_language(&self) -> Option<&str> {
        match &self.kind {
            StepKind::Translate(config) => config.target_language.as_deref(),
            _ => None,
        }
    }
}

impl StepKind {
    pub fn step_type(&self) -> StepType {
        match self {
            StepKind::Summarize(_) => StepType::Summarize,
            StepKind::Translate(_) => StepType::Translate,
            StepKind::Rewrite(_) => StepType::Rewrite,
            StepKind::Extract(_) => StepType::Extract,
        }
    }
}

/// Serialized form of a [`Step`]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawStep {
    id: String,
    #[serde(rename = "type")]
    step_type: StepType,
    config: serde_json::Value,
}

impl TryFrom<RawStep> for Step {
    type Error = serde_json::Error;

    fn try_from(raw: RawStep) -> Result<Self, Self::Error> {
        let kind = match raw.step_type {
            StepType::Summarize => StepKind::Summarize(serde_json::from_value(raw.config)?),
            StepType::Translate => StepKind::Translate(serde_json::from_value(raw.config)?),
            StepType::Rewrite => StepKind::Rewrite(serde_json::from_value(raw.config)?),
            StepType::Extract => StepKind::Extract(serde_json::from_value(raw.config)?),
        };
        Ok(Step { id: raw.id, kind })
    }
}

impl From<Step> for RawStep {
    fn from(step: Step) -> Self {
        let step_type = step.step_type();
        let config = match &step.kind {
            StepKind::Summarize(c) => serde_json::to_value(c),
            StepKind::Translate(c) => serde_json::to_value(c),
            StepKind::Rewrite(c) => serde_json::to_value(c),
            StepKind::Extract(c) => serde_json::to_value(c),
        }
        .unwrap_or_else(|_| serde_json::Value::Object(Default::default()));

        RawStep {
            id: step.id,
            step_type,
            config,
        }
    }
}
