//! Noughts & Crosses - terminal entry point.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use noughts_cli::{AppConfig, Cli, Command, Printer, SessionArgs, run_session};
use noughts_crosses::Session;
use std::path::Path;
use tokio::io::BufReader;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play(args) => run_play(args).await,
        Command::Config(args) => show_config(args),
    }
}

/// Installs the tracing subscriber. Logs go to `log_file` when given so they
/// stay out of the game output.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .with_writer(std::sync::Arc::new(file))
                .with_ansi(false)
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
                )
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
    Ok(())
}

/// Plays rounds on stdin/stdout.
#[instrument(skip_all)]
async fn run_play(args: SessionArgs) -> Result<()> {
    init_tracing(args.log_file.as_deref())?;

    let config = AppConfig::resolve(&args).context("Invalid configuration")?;
    info!(?config, "Starting noughts");

    let mut session = Session::new(*config.timer()).context("Invalid timer settings")?;
    let mut printer = Printer::new(std::io::stdout(), *config.events());
    let input = BufReader::new(tokio::io::stdin());

    run_session(&mut session, config.tick_interval(), input, &mut printer).await
}

/// Prints the effective configuration.
fn show_config(args: SessionArgs) -> Result<()> {
    init_tracing(args.log_file.as_deref())?;
    let config = AppConfig::resolve(&args).context("Invalid configuration")?;
    print!("{}", config.to_toml()?);
    Ok(())
}
