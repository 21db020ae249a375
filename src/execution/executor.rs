//! Step executor - runs individual steps with the generation backend

use crate::{
    core::{
        Error, ExtractConfig, LanguageRegistry, Result, RewriteConfig, Step, StepKind,
        SummarizeConfig, TranslateConfig,
    },
    generation::TextGenerator,
};
use tracing::{debug, info, warn};

/// Language used when a translate step does not name one
pub const DEFAULT_TARGET_LANGUAGE: &str = "Spanish";

/// Style used when a rewrite step does not name one
pub const DEFAULT_STYLE: &str = "professional";

/// Executes a single step
pub struct StepExecutor<G> {
    generator: G,
}

impl<G: TextGenerator> StepExecutor<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Build the prompt for a step, with defaults filled in
    ///
    /// Fails with [`Error::RestrictedLanguage`] for a translate step whose
    /// target language is not on the allow-list.
    pub fn build_prompt(&self, step: &Step, input: &str) -> Result<String> {
        let prompt = match &step.kind {
            StepKind::Summarize(config) => summarize_prompt(config, input),
            StepKind::Translate(config) => translate_prompt(config, input)?,
            StepKind::Rewrite(config) => rewrite_prompt(config, input),
            StepKind::Extract(config) => extract_prompt(config, input),
        };
        Ok(prompt)
    }

    /// Execute a step against one input and return the trimmed output
    pub async fn execute(&self, step: &Step, input: &str) -> Result<String> {
        info!("Executing step: {} ({})", step.id, step.step_type());

        let prompt = self.build_prompt(step, input)?;
        debug!("Prompt for step {}: {}", step.id, prompt);

        let text = self.generator.generate(&prompt).await.map_err(|e| {
            warn!("Generation failed for step {}: {}", step.id, e);
            Error::from(e)
        })?;

        let text = text.trim();
        if text.is_empty() {
            warn!("Step {} received an empty response", step.id);
            return Err(Error::EmptyGeneration {
                step_type: step.step_type(),
            });
        }

        debug!("Step {} produced {} bytes", step.id, text.len());
        Ok(text.to_string())
    }
}

fn summarize_prompt(config: &SummarizeConfig, input: &str) -> String {
    let length = config.length.unwrap_or_default();
    let format = config.format.unwrap_or_default();

    format!(
        "Please summarize the following text.\n\n\
         Requirements:\n\
         - Length: {} (short: 1-2 sentences, medium: 3-4 sentences, long: 5-6 sentences)\n\
         - Format: {} (paragraph: continuous text, bullets: bullet points, outline: numbered list)\n\n\
         Text to summarize:\n\
         \"{}\"\n\n\
         Please provide only the summary without any additional explanations.",
        length.as_str(),
        format.as_str(),
        input
    )
}

fn translate_prompt(config: &TranslateConfig, input: &str) -> Result<String> {
    let language = config
        .target_language
        .as_deref()
        .unwrap_or(DEFAULT_TARGET_LANGUAGE);

    if !LanguageRegistry::is_supported(language) {
        return Err(Error::RestrictedLanguage {
            language: language.to_string(),
        });
    }

    Ok(format!(
        "Please translate the following text to {}.\n\n\
         Text to translate:\n\
         \"{}\"\n\n\
         Please provide only the translation without any additional explanations or notes.",
        language, input
    ))
}

fn rewrite_prompt(config: &RewriteConfig, input: &str) -> String {
    let style = config
        .style
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_STYLE);

    format!(
        "Please rewrite the following text in a {} style.\n\n\
         Text to rewrite:\n\
         \"{}\"\n\n\
         Please provide only the rewritten text without any additional explanations.",
        style, input
    )
}

fn extract_prompt(config: &ExtractConfig, input: &str) -> String {
    let focus = if config.keywords.is_empty() {
        "Extract the most important information.".to_string()
    } else {
        format!("Focus on these keywords: {}", config.keywords.join(", "))
    };

    format!(
        "Please extract key information from the following text.\n\n\
         {}\n\n\
         Text to extract from:\n\
         \"{}\"\n\n\
         Please provide only the extracted information without any additional explanations.",
        focus, input
    )
}
