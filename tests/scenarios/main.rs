//! Scenario-based tests for textflow

mod helpers;
mod mock_generator;

mod language_restriction;
mod synthesis;
