use anyhow::{Context, Result};
use std::io::{IsTerminal, Read};
use std::sync::Arc;
use textflow::cli::commands::{GenerateCommand, LanguagesCommand, RunCommand, ValidateCommand};
use textflow::cli::output::*;
use textflow::cli::{Cli, Command};
use textflow::core::config::PipelineConfig;
use textflow::generation::{GeneratorConfig, TextGenerator};
use textflow::{ExecutionEngine, LanguageRegistry, PipelineSynthesizer};
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Execute command
    match &cli.command {
        Command::Run(cmd) => run_pipeline(cmd, &cli).await?,
        Command::Generate(cmd) => generate_pipeline(cmd, &cli).await?,
        Command::Validate(cmd) => validate_pipeline(cmd)?,
        Command::Languages(cmd) => list_languages(cmd)?,
    }

    Ok(())
}

/// Load generator config and apply command-line overrides
fn build_generator(cli: &Cli) -> Result<Arc<dyn TextGenerator>> {
    let mut config = GeneratorConfig::load(cli.config.as_deref())?;
    if let Some(backend) = cli.backend {
        config = config.with_backend(backend.into());
    }
    if let Some(model) = &cli.model {
        config = config.with_model(model.clone());
    }
    config.validate()?;

    debug!("Using {:?} backend with model {}", config.backend, config.model);
    config
        .build()
        .context("Failed to create generation backend")
}

/// Input precedence: --input, --input-file, the pipeline's `input`, stdin
fn resolve_input(cmd: &RunCommand, config: &PipelineConfig) -> Result<String> {
    if let Some(input) = &cmd.input {
        return Ok(input.clone());
    }
    if let Some(path) = &cmd.input_file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display()));
    }
    if let Some(input) = &config.input {
        return Ok(input.clone());
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        anyhow::bail!("No input given: use --input, --input-file, or pipe text on stdin");
    }
    let mut input = String::new();
    stdin
        .read_to_string(&mut input)
        .context("Failed to read input from stdin")?;
    Ok(input)
}

async fn run_pipeline(cmd: &RunCommand, cli: &Cli) -> Result<()> {
    // Load pipeline config
    let config = PipelineConfig::from_file(&cmd.file).context("Failed to load pipeline config")?;
    let input = resolve_input(cmd, &config)?;
    let generator = build_generator(cli)?;

    let mut engine = ExecutionEngine::new(generator);
    if !cmd.json {
        println!("{} Loaded pipeline: {}", INFO, style(&config.name).bold());
        engine = engine.with_event_handler(|event| println!("{}", format_execution_event(event)));
    }

    let result = engine.execute(&config.steps, &input).await;

    match result {
        Ok(execution) => {
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&execution)?);
            } else {
                println!("\n{}", format_execution(&execution, 20));
                println!(
                    "\n{} {} completed {}",
                    CHECK,
                    style(&config.name).bold(),
                    style("successfully").green()
                );
            }
            Ok(())
        }
        Err(e) => {
            if cmd.json {
                println!("{}", format_failure_json(&e)?);
            } else {
                if let Some(execution) = e.execution() {
                    println!("\n{}", format_execution(execution, 20));
                }
                println!(
                    "\n{} {} {}",
                    CROSS,
                    style(&config.name).bold(),
                    style("failed").red()
                );
            }
            error!("{}", e);
            if e.is_user_correctable() {
                eprintln!("{} {}", WARN, e.root_cause());
            }
            std::process::exit(1);
        }
    }
}

async fn generate_pipeline(cmd: &GenerateCommand, cli: &Cli) -> Result<()> {
    let generator = build_generator(cli)?;
    let synthesizer = PipelineSynthesizer::new(generator);

    let spinner = create_spinner("Generating pipeline steps...");
    let result = synthesizer.generate_steps(&cmd.instruction).await;
    spinner.finish_and_clear();

    let steps = match result {
        Ok(steps) => steps,
        Err(e) => {
            eprintln!("{} Pipeline generation failed:", CROSS);
            eprintln!("  {}", style(&e).red());
            std::process::exit(1);
        }
    };

    let mut config = PipelineConfig::new(&cmd.name, steps);
    config.description = Some(cmd.instruction.clone());
    config.validate()?;

    match &cmd.output {
        Some(path) => {
            config.write_to(path)?;
            eprintln!(
                "{} Wrote {} steps to {}",
                CHECK,
                style(config.steps.len()).cyan(),
                style(path.display()).bold()
            );
        }
        None => print!("{}", config.to_yaml()?),
    }

    Ok(())
}

fn validate_pipeline(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating pipeline...", INFO);

    match PipelineConfig::from_file(&cmd.file) {
        Ok(config) => {
            println!("{} Pipeline configuration is valid!", CHECK);
            println!("  Name: {}", style(&config.name).bold());
            println!("  Steps: {}", style(config.steps.len()).cyan());
            for step in &config.steps {
                println!("    {} ({})", style(&step.id).cyan(), step.step_type());
            }

            if cmd.json {
                let json = serde_json::to_string_pretty(&config)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(format!("{:#}", e)).red());
            std::process::exit(1);
        }
    }
}

fn list_languages(cmd: &LanguagesCommand) -> Result<()> {
    let languages = LanguageRegistry::supported_languages();

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&languages)?);
    } else {
        println!("{} Supported languages ({}):", INFO, languages.len());
        for language in &languages {
            println!("  {}", language);
        }
    }

    Ok(())
}
