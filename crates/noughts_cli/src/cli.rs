//! Command-line interface for noughts.

use crate::config::EventFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Noughts & Crosses - two players, one keyboard, ten seconds a turn
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Noughts and crosses with a turn clock", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play rounds in the terminal until `quit`
    Play(SessionArgs),

    /// Print the effective configuration as TOML
    Config(SessionArgs),
}

/// Settings shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Ticks each side gets per turn
    #[arg(long)]
    pub turn_seconds: Option<u32>,

    /// Remaining ticks at which the hurry warning fires
    #[arg(long)]
    pub hurry_threshold: Option<u32>,

    /// Length of one tick in milliseconds
    #[arg(long)]
    pub tick_millis: Option<u64>,

    /// Event output format
    #[arg(long, value_enum)]
    pub events: Option<EventFormat>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
