//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod anonymize;
pub mod deanonymize;
pub mod init;
pub mod mappings;
pub mod serve;
pub mod validate;

use crate::config::{load_config_or_default, ChatmaskConfig};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Exit code for configuration errors
pub const EXIT_CONFIG_ERROR: i32 = 2;
/// Exit code when no mappings match
pub const EXIT_NOT_FOUND: i32 = 3;
/// Exit code for fatal errors
pub const EXIT_FATAL: i32 = 5;

/// Load the configuration, printing the failure for the user
pub(crate) fn load_or_report(config_path: Option<&Path>) -> Option<ChatmaskConfig> {
    match load_config_or_default(config_path) {
        Ok(config) => Some(config),
        Err(e) => {
            println!("❌ Failed to load configuration file");
            println!("   Error: {e}");
            None
        }
    }
}

/// Use `text` when given, otherwise read all of stdin
pub(crate) async fn text_or_stdin(text: Option<&str>) -> anyhow::Result<String> {
    match text {
        Some(text) if text != "-" => Ok(text.to_string()),
        _ => {
            let mut buffer = String::new();
            tokio::io::stdin().read_to_string(&mut buffer).await?;
            Ok(buffer.trim_end_matches(['\r', '\n']).to_string())
        }
    }
}
