//! Test: Synthesis - building a step list from an instruction

use crate::helpers::*;
use crate::mock_generator::{embedded_text, MockGenerator};
use std::sync::Arc;
use textflow::core::{StepKind, SummarizeConfig, SUPPORTED_LANGUAGES};
use textflow::generation::GenerationError;
use textflow::{Error, PipelineSynthesizer, Step};

/// A translate step to an unsupported language fails the whole list
#[tokio::test]
async fn test_synthesized_restricted_language() {
    let mock = MockGenerator::new([
        r#"[{"id":"s1","type":"translate","config":{"targetLanguage":"Klingon"}}]"#,
    ])
    .shared();

    let result = textflow::generate_steps(Arc::clone(&mock), "Translate this to Klingon").await;

    assert!(matches!(
        result,
        Err(Error::RestrictedLanguage { ref language }) if language == "Klingon"
    ));
    assert_eq!(mock.calls(), 1);
}

/// Anything that is not a JSON array of steps is an invalid synthesis
#[tokio::test]
async fn test_malformed_json() {
    for response in [
        "Here you go: [{\"id\": \"s1\"",
        "```json\n[]\n```",
        "{\"steps\": []}",
    ] {
        let mock = MockGenerator::new([response]).shared();
        let result = textflow::generate_steps(Arc::clone(&mock), "Summarize it").await;
        assert!(
            matches!(result, Err(Error::InvalidSynthesis { .. })),
            "response {:?} gave {:?}",
            response,
            result
        );
    }
}

/// Defaults are not filled at synthesis time, only when the step runs
#[tokio::test]
async fn test_summarize_defaults_filled_at_execution() {
    let mock = MockGenerator::new([
        r#"[{"id":"s1","type":"summarize","config":{}}]"#,
        "A short summary.",
    ])
    .shared();

    let steps = textflow::generate_steps(Arc::clone(&mock), "Summarize this article")
        .await
        .unwrap();

    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].id, "s1");
    assert_eq!(steps[0].kind, StepKind::Summarize(SummarizeConfig::default()));

    let execution = run_with_mock(&mock, &steps, "A long article").await.unwrap();
    assert_outputs(&execution, &[("s1", "A short summary.")]);

    let prompt = &mock.prompts()[1];
    assert!(prompt.contains("Length: medium"));
    assert!(prompt.contains("Format: paragraph"));
    assert_eq!(embedded_text(prompt), "A long article");
}

/// The meta-prompt carries the instruction, the step types and every language
#[tokio::test]
async fn test_meta_prompt_contents() {
    let mock = MockGenerator::new([r#"[{"id":"s1","type":"rewrite","config":{"style":"casual"}}]"#])
        .shared();
    let synthesizer = PipelineSynthesizer::new(Arc::clone(&mock));

    let steps = synthesizer
        .generate_steps("  Make it casual  ")
        .await
        .unwrap();
    assert_eq!(steps, vec![Step::rewrite("s1", "casual")]);

    let prompt = &mock.prompts()[0];
    assert!(prompt.contains("User instruction: \"Make it casual\""));
    for step_type in ["summarize", "translate", "rewrite", "extract"] {
        assert!(prompt.contains(step_type), "missing step type {}", step_type);
    }
    for language in SUPPORTED_LANGUAGES {
        assert!(prompt.contains(language), "missing language {}", language);
    }
    assert!(prompt.contains("Respond with only the JSON array"));
}

/// A blank instruction never reaches the backend
#[tokio::test]
async fn test_blank_instruction() {
    let mock = MockGenerator::new(["[]"]).shared();

    let result = textflow::generate_steps(Arc::clone(&mock), " \n ").await;

    assert!(matches!(result, Err(Error::EmptyInstruction)));
    assert_eq!(mock.calls(), 0);
}

/// Backend failures surface unchanged
#[tokio::test]
async fn test_backend_error_passes_through() {
    let mock = MockGenerator::new(Vec::<String>::new())
        .then_fail(GenerationError::Api("HTTP 500".to_string()))
        .shared();

    let result = textflow::generate_steps(Arc::clone(&mock), "Summarize").await;

    assert!(matches!(
        result,
        Err(Error::Generation(GenerationError::Api(_)))
    ));
}

/// A synthesized pipeline runs end to end on the same backend
#[tokio::test]
async fn test_generate_then_execute() {
    let mock = MockGenerator::new([
        r#"[
            {"id": "step1", "type": "rewrite", "config": {"style": "professional"}},
            {"id": "step2", "type": "translate", "config": {"targetLanguage": "Spanish"}}
        ]"#,
        "Our results exceeded expectations.",
        "Nuestros resultados superaron las expectativas.",
    ])
    .shared();

    let steps = textflow::generate_steps(Arc::clone(&mock), "Make it professional, then Spanish")
        .await
        .unwrap();
    let execution = run_with_mock(&mock, &steps, "results were great lol")
        .await
        .unwrap();

    assert_pipeline_completed(&execution);
    assert_outputs(
        &execution,
        &[
            ("step1", "Our results exceeded expectations."),
            ("step2", "Nuestros resultados superaron las expectativas."),
        ],
    );
    assert_eq!(mock.calls(), 3);
}
