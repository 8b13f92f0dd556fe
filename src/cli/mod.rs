//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Roster using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Roster - user directory service
#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(version, about, long_about = None)]
#[command(author = "Roster Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "roster.toml", env = "ROSTER_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ROSTER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),

    /// Run one ingestion pass and exit
    Ingest(commands::ingest::IngestArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Commands {
    /// Whether the command runs against a loaded configuration
    pub fn uses_config(&self) -> bool {
        matches!(self, Commands::Serve(_) | Commands::Ingest(_))
    }
}
