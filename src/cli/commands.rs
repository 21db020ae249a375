//! CLI command definitions

use crate::generation::BackendKind;
use clap::Args;
use std::path::PathBuf;

/// Run a pipeline
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Path to pipeline YAML file
    #[arg(short, long)]
    pub file: PathBuf,

    /// Input text (defaults to the pipeline's `input`, then stdin)
    #[arg(short, long, conflicts_with = "input_file")]
    pub input: Option<String>,

    /// Read input text from a file
    #[arg(long)]
    pub input_file: Option<PathBuf>,

    /// Print the execution record as JSON
    #[arg(long)]
    pub json: bool,
}

/// Generate a pipeline from an instruction
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// What the pipeline should do, in plain language
    #[arg(short, long)]
    pub instruction: String,

    /// Write the pipeline YAML to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Name for the generated pipeline
    #[arg(short, long, default_value = "generated")]
    pub name: String,
}

/// Validate a pipeline configuration
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to pipeline YAML file
    #[arg(short, long)]
    pub file: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// List supported languages
#[derive(Debug, Args, Clone)]
pub struct LanguagesCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Generation backend argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BackendArg {
    #[value(name = "openai")]
    OpenAi,
    Command,
}

impl From<BackendArg> for BackendKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::OpenAi => BackendKind::OpenAi,
            BackendArg::Command => BackendKind::Command,
        }
    }
}
