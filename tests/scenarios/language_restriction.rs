//! Test: Language Restriction - translate targets must be on the allow-list

use crate::helpers::*;
use crate::mock_generator::MockGenerator;
use textflow::core::{LanguageRegistry, SUPPORTED_LANGUAGES};
use textflow::{Error, Step};

/// An unsupported language fails the step without calling the backend
#[tokio::test]
async fn test_restricted_language_skips_backend() {
    let mock = MockGenerator::new(["Hey there", "nuqneH"]).shared();
    let steps = vec![Step::rewrite("s1", "casual"), Step::translate("s2", "Klingon")];

    let err = run_with_mock(&mock, &steps, "Hello").await.unwrap_err();

    let execution = assert_failed_at(&err, "s2");
    assert_outputs(execution, &[("s1", "Hey there")]);
    assert!(matches!(
        err.root_cause(),
        Error::RestrictedLanguage { language } if language == "Klingon"
    ));
    assert!(err.is_user_correctable());
    // only the rewrite reached the backend
    assert_eq!(mock.calls(), 1);
}

/// Matching is exact: lowercase names are not canonical
#[tokio::test]
async fn test_language_match_is_case_sensitive() {
    let mock = MockGenerator::new(["Hola"]).shared();

    let err = run_with_mock(&mock, &[Step::translate("s1", "spanish")], "Hello")
        .await
        .unwrap_err();

    assert!(matches!(
        err.root_cause(),
        Error::RestrictedLanguage { language } if language == "spanish"
    ));
    assert_eq!(mock.calls(), 0);
}

/// Every listed language is accepted by a translate step
#[tokio::test]
async fn test_every_supported_language_translates() {
    let mock = MockGenerator::transforming(|_| "ok".to_string()).shared();

    for language in SUPPORTED_LANGUAGES {
        let execution = run_with_mock(&mock, &[Step::translate("t", language)], "Hello")
            .await
            .unwrap_or_else(|e| panic!("{} should be supported: {}", language, e));
        assert_pipeline_completed(&execution);
        assert!(mock.prompts().last().unwrap().contains(&format!("to {}.", language)));
    }

    assert_eq!(mock.calls(), SUPPORTED_LANGUAGES.len());
}

/// The registry hands out copies in definition order
#[test]
fn test_supported_languages_listing() {
    let mut listed = LanguageRegistry::supported_languages();
    assert_eq!(listed.len(), 30);
    assert_eq!(listed.first().map(String::as_str), Some("English"));
    assert_eq!(listed.last().map(String::as_str), Some("Filipino"));

    listed.clear();
    assert_eq!(LanguageRegistry::supported_languages().len(), 30);
}

/// Pipeline files naming a restricted language are rejected on load
#[test]
fn test_pipeline_file_rejects_restricted_language() {
    let result = textflow::core::config::PipelineConfig::from_yaml(
        r#"
name: "Bad"
steps:
  - id: "s1"
    type: "translate"
    config:
      targetLanguage: "Elvish"
"#,
    );
    assert!(result.is_err());
}
