//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the chatmask configuration file.

use super::EXIT_CONFIG_ERROR;
use crate::anonymization::detector::PatternRegistry;
use crate::anonymization::EntityType;
use crate::config::load_config_or_default;
use clap::Args;
use std::path::Path;

/// Selected entity types the pattern library cannot detect
fn uncovered_entities(registry: &PatternRegistry, entities: &[EntityType]) -> Vec<EntityType> {
    entities
        .iter()
        .filter(|e| registry.patterns_for_type(e).is_none())
        .cloned()
        .collect()
}

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        let shown = config_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<defaults>".to_string());
        tracing::info!(config_path = %shown, "Validating configuration");

        println!("🔍 Validating configuration: {shown}");
        println!();

        // Loading applies env overrides and runs validate()
        let config = match load_config_or_default(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let registry = match config.anonymization.pattern_library {
            Some(ref path) => PatternRegistry::from_file(path),
            None => PatternRegistry::default_patterns(),
        };
        let registry = match registry {
            Ok(r) => r,
            Err(e) => {
                println!("❌ Pattern library failed to load");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let entities = config.anonymization.default_entities();
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Server: {}", config.server.bind_address());
        println!("  Store Backend: {:?}", config.store.backend);
        println!("  Store Path: {}", config.store.path.display());
        println!("  Generic Context: {}", config.store.generic_context);
        println!(
            "  Concrete Prefixes: {:?}",
            config.store.concrete_context_prefixes
        );
        println!("  Default Method: {}", config.anonymization.method);
        println!(
            "  Default Entities: {}",
            entities
                .iter()
                .map(|e| e.label())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!("  Patterns Loaded: {}", registry.all_patterns().len());
        let uncovered = uncovered_entities(&registry, &entities);
        if !uncovered.is_empty() {
            println!(
                "  ⚠️  No patterns for: {}",
                uncovered
                    .iter()
                    .map(|e| e.label())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        println!("  Min Confidence: {}", config.anonymization.min_confidence);
        println!("  Audit Enabled: {}", config.anonymization.audit.enabled);
        println!("  File Logging: {}", config.logging.local_enabled);
        println!();
        Ok(0)
    }
}
