//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG_ERROR, EXIT_FATAL};
use crate::config::DEFAULT_CONFIG_FILE;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing chatmask configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG_ERROR);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: chatmask validate-config");
                println!("  3. Start the server: chatmask serve");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# chatmask configuration

[application]
log_level = "info"

[server]
host = "127.0.0.1"
port = 5000

[store]
backend = "json"
path = "mappings/chatgpt.json"
generic_context = "https://chatgpt.com/"
concrete_context_prefixes = ["https://chatgpt.com/c/"]

[anonymization]
method = "redact"
entities = []
min_confidence = 0.5

[anonymization.audit]
enabled = false
log_path = "./audit/anonymization.log"

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# chatmask configuration
#
# Every section is optional. Values of the form ${VAR} are replaced with
# environment variables, and CHATMASK_<SECTION>_<KEY> variables override
# anything set here (e.g. CHATMASK_SERVER_PORT=8080).

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
log_level = "info"

# ============================================================================
# HTTP Server
# ============================================================================
[server]
# Keep this on loopback: the server holds original values in plain text
host = "127.0.0.1"
port = 5000

# ============================================================================
# Mapping Store
# ============================================================================
[store]
# json | memory (memory loses everything on exit)
backend = "json"

# Mapping history file, written atomically
path = "mappings/chatgpt.json"

# Context used when a request carries no URL
generic_context = "https://chatgpt.com/"

# Keys starting with one of these are concrete conversations. The first
# concrete key to arrive adopts the history recorded under generic_context.
concrete_context_prefixes = ["https://chatgpt.com/c/"]

# ============================================================================
# Anonymization Defaults
# ============================================================================
[anonymization]
# redact -> [REDACTED_PERSON], fake -> realistic surrogate values
method = "redact"

# Entity types to detect when the client sends none. Empty = all known:
# PERSON, EMAIL_ADDRESS, PHONE_NUMBER, CREDIT_CARD, US_SSN, US_BANK_NUMBER,
# LOCATION, NRP, DATE_TIME, IP_ADDRESS
entities = ["PERSON", "EMAIL_ADDRESS", "PHONE_NUMBER"]

# Custom pattern library (TOML); the built-in library is used when unset
# pattern_library = "./patterns/entity_patterns.toml"

# Patterns below this confidence are ignored (0.0 - 1.0)
min_confidence = 0.5

[anonymization.audit]
# JSON-lines audit trail; original values are stored as SHA-256 hashes only
enabled = false
log_path = "./audit/anonymization.log"

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable JSON file logging in addition to the console
local_enabled = false
local_path = "./logs"

# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}
