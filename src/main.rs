//! # Main Entry Point
//!
//! Wires the layers together:
//! - Domain: configuration, types and the question catalog
//! - Infrastructure: LLM providers
//! - Application: wizard controller, strategy generator, formatter
//! - Interface: console wizard and subcommands

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::application::generator::StrategyGenerator;
use crate::application::wizard::WizardController;
use crate::domain::config::AppConfig;
use crate::infrastructure::llm::Client as LlmClient;
use crate::interface::commands::generate::GenerateArgs;

#[derive(Debug, Parser)]
#[command(name = "viralforge", version, about = "Forge viral titles, hooks and video flow")]
struct Cli {
    /// Path to a config file (defaults to data/config.yaml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Also log to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Agent to generate with, overriding `generator.agent`
    #[arg(long, global = true)]
    agent: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Step through the questionnaire in the terminal (default)
    Interactive,
    /// Answer every question from flags and print the strategy
    Generate(GenerateArgs),
    /// List the questions and their options
    Questions,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Configuration
    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    // 2. Logging (guard must live until exit so buffered lines are flushed)
    let _guard = init_logging(&config, cli.verbose)?;
    tracing::info!("Starting ViralForge...");

    // 3. Generator
    let agent = config.agent_name(cli.agent.as_deref()).to_string();
    let llm = Arc::new(LlmClient::new(config.clone()));
    if let Err(e) = llm.resolve(&agent) {
        tracing::warn!("Agent '{}' is not usable yet: {}", agent, e);
    }
    let generator = Arc::new(StrategyGenerator::new(llm, agent, &config.generator));

    // 4. Wizard
    let wizard = Arc::new(WizardController::new(generator));

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => interface::console::run(wizard).await,
        Command::Generate(args) => interface::commands::generate::handle_generate(wizard, args).await,
        Command::Questions => {
            interface::commands::questions::handle_questions(&wizard);
            Ok(())
        }
    }
}

fn init_logging(config: &AppConfig, verbose: bool) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let mut guard = None;
    let file_layer = match config.log_path() {
        Some(path) => {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
            let file_name = path
                .file_name()
                .context("Log file path has no file name")?
                .to_owned();

            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

            // Clear previous session log
            if path.exists() {
                let _ = fs::remove_file(&path);
            }

            let file_appender = tracing_appender::rolling::never(&dir, file_name);
            let (non_blocking, worker_guard) = tracing_appender::non_blocking(file_appender);
            guard = Some(worker_guard);

            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
        }
        None => None,
    };

    // stdout belongs to the wizard
    let console_layer = verbose.then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    Ok(guard)
}
