//! Serve command implementation
//!
//! Runs the HTTP server until a shutdown signal arrives.

use super::{load_or_report, EXIT_CONFIG_ERROR, EXIT_FATAL};
use crate::anonymization::AnonymizationEngine;
use crate::server;
use clap::Args;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override server.host
    #[arg(long)]
    pub host: Option<String>,

    /// Override server.port
    #[arg(long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(
        &self,
        config_path: Option<&Path>,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let Some(mut config) = load_or_report(config_path) else {
            return Ok(EXIT_CONFIG_ERROR);
        };
        if let Some(ref host) = self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }

        let engine = match AnonymizationEngine::from_config(&config) {
            Ok(engine) => Arc::new(engine),
            Err(e) => {
                println!("❌ Failed to initialize anonymization engine");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let address = config.server.bind_address();
        println!("🚀 chatmask listening on http://{address}");
        println!("   Mapping store: {}", engine.mappings().describe());

        match server::serve(engine, &address, shutdown_signal).await {
            Ok(()) => {
                println!("👋 Server stopped");
                Ok(0)
            }
            Err(e) => {
                crate::log_error_with_context!(e, "HTTP server failed");
                println!("❌ Server error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }
}
