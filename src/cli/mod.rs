//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{BackendArg, GenerateCommand, LanguagesCommand, RunCommand, ValidateCommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// Chain AI text transformations into pipelines
#[derive(Debug, Parser, Clone)]
#[command(name = "textflow")]
#[command(version)]
#[command(about = "Chain AI text transformations (summarize, translate, rewrite, extract) into pipelines", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to generator configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the generation backend
    #[arg(short, long, global = true, value_enum)]
    pub backend: Option<BackendArg>,

    /// Override the model name
    #[arg(short, long, global = true)]
    pub model: Option<String>,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run a pipeline over an input text
    Run(RunCommand),

    /// Generate a pipeline from a natural-language instruction
    Generate(GenerateCommand),

    /// Validate a pipeline configuration
    Validate(ValidateCommand),

    /// List supported translation languages
    Languages(LanguagesCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
