//! Deanonymize command implementation

use super::{load_or_report, text_or_stdin, EXIT_CONFIG_ERROR, EXIT_NOT_FOUND};
use crate::anonymization::AnonymizationEngine;
use clap::Args;
use std::path::Path;

/// Arguments for the deanonymize command
#[derive(Args, Debug)]
pub struct DeanonymizeArgs {
    /// Anonymized text; reads stdin when omitted or "-"
    pub text: Option<String>,

    /// Context key (conversation URL)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Print the full response as JSON
    #[arg(long)]
    pub json: bool,
}

impl DeanonymizeArgs {
    /// Execute the deanonymize command
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        let Some(config) = load_or_report(config_path) else {
            return Ok(EXIT_CONFIG_ERROR);
        };

        let text = text_or_stdin(self.text.as_deref()).await?;
        let engine = AnonymizationEngine::from_config(&config)?;

        let response = match engine.deanonymize(&text, self.url.as_deref()).await {
            Ok(response) => response,
            Err(e) if e.is_not_found() => {
                println!("❌ {}", e.message());
                return Ok(EXIT_NOT_FOUND);
            }
            Err(e) => return Err(e.into()),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else {
            println!("{}", response.deanonymized_text);
        }

        Ok(0)
    }
}
