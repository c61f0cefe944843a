//! Configuration management for chatmask.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! chatmask reads `chatmask.toml` with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CHATMASK_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting, so the file is optional
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chatmask::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("chatmask.toml")?;
//!
//! println!("Listening on {}", config.server.bind_address());
//! println!("Mappings stored at {}", config.store.path.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`ServerConfig`] - HTTP bind address
//! - [`StoreConfig`] - Mapping store backend, path and context policy
//! - [`AnonymizationConfig`] - Default method, entity types, pattern library, audit
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 5000
//!
//! [store]
//! path = "${CHATMASK_HOME}/mappings/chatgpt.json"
//! generic_context = "https://chatgpt.com/"
//! concrete_context_prefixes = ["https://chatgpt.com/c/"]
//!
//! [anonymization]
//! method = "redact"
//! entities = []
//!
//! [anonymization.audit]
//! enabled = false
//! ```

pub mod loader;
pub mod schema;

pub use crate::anonymization::config::{AnonymizationConfig, AuditConfig, ClientConfig};
pub use loader::{load_config, load_config_or_default, DEFAULT_CONFIG_FILE};
pub use schema::{
    ApplicationConfig, ChatmaskConfig, LoggingConfig, ServerConfig, StoreBackend, StoreConfig,
};
