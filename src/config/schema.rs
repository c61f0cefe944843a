//! Configuration schema types
//!
//! This module defines the configuration structure for chatmask. Every
//! section has defaults, so an empty file (or no file) is a valid
//! configuration.

use crate::anonymization::config::AnonymizationConfig;
use crate::core::mappings::ContextPolicy;
use crate::domain::ContextKey;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main chatmask configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatmaskConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Mapping store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Anonymization defaults
    #[serde(default)]
    pub anonymization: AnonymizationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ChatmaskConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.server.validate()?;
        self.store.validate()?;
        self.anonymization.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("server.host cannot be empty".to_string());
        }
        if self.port == 0 {
            return Err("server.port must be > 0".to_string());
        }
        Ok(())
    }

    /// `host:port` string for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Mapping store backend selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Pretty-printed JSON file
    #[default]
    Json,
    /// Process memory; lost on exit
    Memory,
}

/// Mapping store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Storage backend
    #[serde(default)]
    pub backend: StoreBackend,

    /// Store file path (json backend)
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// Context key used when a request names none
    #[serde(default = "default_generic_context")]
    pub generic_context: String,

    /// Prefixes that mark a context key as a concrete conversation
    ///
    /// Empty means every key other than the generic one is concrete.
    #[serde(default = "default_concrete_prefixes")]
    pub concrete_context_prefixes: Vec<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: default_store_path(),
            generic_context: default_generic_context(),
            concrete_context_prefixes: default_concrete_prefixes(),
        }
    }
}

impl StoreConfig {
    fn validate(&self) -> Result<(), String> {
        if self.generic_context.trim().is_empty() {
            return Err("store.generic_context cannot be empty".to_string());
        }
        if self.backend == StoreBackend::Json && self.path.as_os_str().is_empty() {
            return Err("store.path cannot be empty for the json backend".to_string());
        }
        if self
            .concrete_context_prefixes
            .iter()
            .any(|p| p.trim().is_empty())
        {
            return Err("store.concrete_context_prefixes cannot contain empty prefixes".to_string());
        }
        Ok(())
    }

    /// Build the context policy described by this section
    pub fn context_policy(&self) -> crate::domain::Result<ContextPolicy> {
        Ok(ContextPolicy::new(
            ContextKey::new(self.generic_context.clone())?,
            self.concrete_context_prefixes.clone(),
        ))
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }
        Ok(())
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_store_path() -> PathBuf {
    PathBuf::from("mappings/chatgpt.json")
}

fn default_generic_context() -> String {
    "https://chatgpt.com/".to_string()
}

fn default_concrete_prefixes() -> Vec<String> {
    vec!["https://chatgpt.com/c/".to_string()]
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "verbose".to_string();
        assert!(config.validate().unwrap_err().contains("verbose"));
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config: ChatmaskConfig = toml::from_str("").unwrap();
        assert_eq!(config, ChatmaskConfig::default());
        assert!(config.validate().is_ok());
        assert_eq!(config.server.bind_address(), "127.0.0.1:5000");
        assert_eq!(config.store.path, PathBuf::from("mappings/chatgpt.json"));
    }

    #[test]
    fn test_store_config_validation() {
        let mut config = StoreConfig::default();
        assert!(config.validate().is_ok());

        config.generic_context = "  ".to_string();
        assert!(config.validate().is_err());

        let config = StoreConfig {
            concrete_context_prefixes: vec![String::new()],
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = StoreConfig {
            backend: StoreBackend::Memory,
            path: PathBuf::new(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_context_policy_from_store_config() {
        let policy = StoreConfig::default().context_policy().unwrap();
        assert_eq!(policy.generic().as_str(), "https://chatgpt.com/");
        assert!(policy.is_concrete(&ContextKey::new("https://chatgpt.com/c/1").unwrap()));
    }

    #[test]
    fn test_server_config_validation() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(!config.local_enabled);
        assert_eq!(config.local_path, "./logs");
        assert_eq!(config.local_rotation, "daily");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_logging_rotation_validation() {
        let config = LoggingConfig {
            local_rotation: "size".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_store_backend_parses_lowercase() {
        let config: StoreConfig = toml::from_str(r#"backend = "memory""#).unwrap();
        assert_eq!(config.backend, StoreBackend::Memory);
    }
}
