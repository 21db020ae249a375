//! Instruction-to-steps synthesis

use crate::{
    core::{Error, LanguageRegistry, Result, Step, StepType, SUPPORTED_LANGUAGES},
    generation::TextGenerator,
};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Builds a step list from a free-text instruction
///
/// The backend is asked once for a JSON array of steps; the answer is
/// treated as untrusted and validated in full before any [`Step`] is
/// returned. Either every element is accepted or the call fails.
pub struct PipelineSynthesizer<G> {
    generator: G,
}

impl<G: TextGenerator> PipelineSynthesizer<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Build the meta-prompt sent to the backend
    pub fn build_prompt(&self, instruction: &str) -> String {
        let step_types = StepType::ALL
            .iter()
            .enumerate()
            .map(|(i, t)| format!("{}. {} - {}", i + 1, t, t.description()))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"You are an AI pipeline builder. Based on the user's instruction, create a sequence of pipeline steps that will accomplish their goal.

Available step types:
{step_types}

Step configuration:
- summarize: {{"length": "short" | "medium" | "long", "format": "paragraph" | "bullets" | "outline"}}
- translate: {{"targetLanguage": "<language>"}}
- rewrite: {{"style": "<style, e.g. professional, casual>"}}
- extract: {{"keywords": ["<keyword>", ...]}}

IMPORTANT: For translation steps, only use these supported languages:
{languages}

User instruction: "{instruction}"

Please respond with a JSON array of pipeline steps. Each step should have:
- id: unique identifier (e.g., "step1", "step2")
- type: one of the available step types
- config: configuration object with appropriate parameters

Example response format:
[
  {{
    "id": "step1",
    "type": "rewrite",
    "config": {{
      "style": "professional"
    }}
  }},
  {{
    "id": "step2",
    "type": "translate",
    "config": {{
      "targetLanguage": "Spanish"
    }}
  }}
]

Respond with only the JSON array, no additional text."#,
            step_types = step_types,
            languages = SUPPORTED_LANGUAGES.join(", "),
            instruction = instruction,
        )
    }

    /// Ask the backend for a step list and validate it
    ///
    /// # Errors
    /// - [`Error::EmptyInstruction`] if the instruction is blank
    /// - [`Error::Generation`] if the backend call fails
    /// - [`Error::InvalidSynthesis`] if the answer is not a valid step list
    /// - [`Error::RestrictedLanguage`] if a translate step names an
    ///   unsupported language
    pub async fn generate_steps(&self, instruction: &str) -> Result<Vec<Step>> {
        let instruction = instruction.trim();
        if instruction.is_empty() {
            return Err(Error::EmptyInstruction);
        }

        info!("Synthesizing pipeline from instruction");
        let prompt = self.build_prompt(instruction);
        let response = self.generator.generate(&prompt).await?;
        debug!("Synthesis response: {}", response);

        let steps = parse_steps(&response)?;
        info!("Synthesized {} steps", steps.len());
        Ok(steps)
    }
}

/// Parse and validate a synthesized step list
pub fn parse_steps(response: &str) -> Result<Vec<Step>> {
    let response = response.trim();
    if response.is_empty() {
        return Err(Error::invalid_synthesis("the backend returned an empty response"));
    }

    let value: Value = serde_json::from_str(response).map_err(|e| {
        warn!("Synthesis response is not JSON: {}", e);
        Error::invalid_synthesis(format!("response is not valid JSON: {}", e))
    })?;

    let elements = match value {
        Value::Array(elements) => elements,
        _ => return Err(Error::invalid_synthesis("response is not a JSON array")),
    };
    if elements.is_empty() {
        return Err(Error::invalid_synthesis("response contains no steps"));
    }

    let mut seen_ids = HashSet::new();
    let mut steps = Vec::with_capacity(elements.len());

    for (index, element) in elements.into_iter().enumerate() {
        let object = element
            .as_object()
            .ok_or_else(|| Error::invalid_synthesis(format!("step {} is not an object", index)))?;
        check_element(index, object)?;

        let step: Step = serde_json::from_value(element).map_err(|e| {
            Error::invalid_synthesis(format!("step {} has an invalid config: {}", index, e))
        })?;

        if !seen_ids.insert(step.id.clone()) {
            return Err(Error::invalid_synthesis(format!(
                "duplicate step id '{}'",
                step.id
            )));
        }
        steps.push(step);
    }

    Ok(steps)
}

/// Check the required fields of one raw element
fn check_element(index: usize, object: &Map<String, Value>) -> Result<()> {
    let id = object.get("id").and_then(Value::as_str).unwrap_or_default();
    if id.trim().is_empty() {
        return Err(Error::invalid_synthesis(format!(
            "step {} is missing a non-empty string id",
            index
        )));
    }

    let type_name = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::invalid_synthesis(format!("step '{}' is missing a type", id)))?;
    let step_type = StepType::from_name(type_name).ok_or_else(|| {
        Error::invalid_synthesis(format!("step '{}' has unknown type '{}'", id, type_name))
    })?;

    let config = object
        .get("config")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            Error::invalid_synthesis(format!("step '{}' is missing a config object", id))
        })?;

    if step_type == StepType::Translate {
        match config.get("targetLanguage") {
            None | Some(Value::Null) => {}
            Some(Value::String(language)) => {
                if !LanguageRegistry::is_supported(language) {
                    return Err(Error::RestrictedLanguage {
                        language: language.clone(),
                    });
                }
            }
            Some(_) => {
                return Err(Error::invalid_synthesis(format!(
                    "step '{}' has a non-string targetLanguage",
                    id
                )))
            }
        }
    }

    Ok(())
}
