//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for chatmask using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Chatmask - reversible anonymization for chat prompts
#[derive(Parser, Debug)]
#[command(name = "chatmask")]
#[command(version, about, long_about = None)]
#[command(author = "Chatmask Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults to ./chatmask.toml when present)
    #[arg(short, long, env = "CHATMASK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CHATMASK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),

    /// Anonymize text and record the mapping
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Restore original values in previously anonymized text
    Deanonymize(commands::deanonymize::DeanonymizeArgs),

    /// Show the stored mapping history
    Mappings(commands::mappings::MappingsArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
