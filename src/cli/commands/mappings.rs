//! Mappings command implementation
//!
//! Prints the mapping store, either whole as JSON or as a per-context
//! summary.

use super::{load_or_report, EXIT_CONFIG_ERROR, EXIT_NOT_FOUND};
use crate::adapters::storage::create_mapping_storage;
use crate::core::mappings::MappingManager;
use clap::Args;
use std::path::Path;

/// Arguments for the mappings command
#[derive(Args, Debug)]
pub struct MappingsArgs {
    /// Only show this context
    #[arg(long)]
    pub context: Option<String>,

    /// Print context names and entry counts instead of JSON
    #[arg(long)]
    pub summary: bool,
}

impl MappingsArgs {
    /// Execute the mappings command
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        let Some(config) = load_or_report(config_path) else {
            return Ok(EXIT_CONFIG_ERROR);
        };

        let manager = MappingManager::new(
            create_mapping_storage(&config.store),
            config.store.context_policy()?,
        );
        let store = manager.snapshot().await;

        if let Some(ref context) = self.context {
            let Some(entries) = store.context(context) else {
                println!("❌ No mappings found for context: {context}");
                return Ok(EXIT_NOT_FOUND);
            };
            println!("{}", serde_json::to_string_pretty(entries)?);
            return Ok(0);
        }

        if !self.summary {
            println!("{}", serde_json::to_string_pretty(&store)?);
            return Ok(0);
        }

        println!("📊 Mapping store: {}", manager.describe());
        println!();
        if store.is_empty() {
            println!("No mappings recorded yet.");
            return Ok(0);
        }
        for (context, entries) in store.iter() {
            let replacements: usize = entries.iter().map(|e| e.len()).sum();
            println!("  {context}");
            println!("    entries: {}, replacements: {replacements}", entries.len());
        }
        println!();
        println!(
            "Total: {} contexts, {} entries",
            store.len(),
            store.total_entries()
        );

        Ok(0)
    }
}
