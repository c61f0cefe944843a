//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{ChatmaskConfig, StoreBackend};
use crate::domain::errors::MaskError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "chatmask.toml";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ChatmaskConfig
/// 4. Applies environment variable overrides (CHATMASK_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a configuration error if the file cannot be read or parsed, a
/// referenced environment variable is missing, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use chatmask::config::loader::load_config;
///
/// let config = load_config("chatmask.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ChatmaskConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MaskError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        MaskError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: ChatmaskConfig = toml::from_str(&contents)
        .map_err(|e| MaskError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finalize(config)
}

/// Loads configuration from `path`, or falls back to defaults
///
/// With no explicit path, `chatmask.toml` in the working directory is used
/// when present; otherwise built-in defaults apply. Environment overrides
/// and validation run in both cases.
pub fn load_config_or_default(path: Option<&Path>) -> Result<ChatmaskConfig> {
    if let Some(path) = path {
        return load_config(path);
    }

    let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        return load_config(default_path);
    }

    tracing::debug!("No configuration file found, using defaults");
    finalize(ChatmaskConfig::default())
}

fn finalize(mut config: ChatmaskConfig) -> Result<ChatmaskConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        MaskError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| MaskError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(MaskError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using CHATMASK_* prefix
///
/// Environment variables follow the pattern: CHATMASK_<SECTION>_<KEY>
/// For example: CHATMASK_SERVER_PORT, CHATMASK_STORE_PATH
fn apply_env_overrides(config: &mut ChatmaskConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("CHATMASK_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Server overrides
    if let Ok(val) = std::env::var("CHATMASK_SERVER_HOST") {
        config.server.host = val;
    }
    if let Ok(val) = std::env::var("CHATMASK_SERVER_PORT") {
        config.server.port = val.parse().map_err(|_| {
            MaskError::Configuration(format!("Invalid CHATMASK_SERVER_PORT: {val}"))
        })?;
    }

    // Store overrides
    if let Ok(val) = std::env::var("CHATMASK_STORE_BACKEND") {
        config.store.backend = match val.to_lowercase().as_str() {
            "json" => StoreBackend::Json,
            "memory" => StoreBackend::Memory,
            _ => {
                return Err(MaskError::Configuration(format!(
                    "Invalid CHATMASK_STORE_BACKEND: {val}"
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("CHATMASK_STORE_PATH") {
        config.store.path = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("CHATMASK_STORE_GENERIC_CONTEXT") {
        config.store.generic_context = val;
    }
    if let Ok(val) = std::env::var("CHATMASK_STORE_CONCRETE_CONTEXT_PREFIXES") {
        config.store.concrete_context_prefixes = val
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
    }

    // Anonymization overrides
    config.anonymization.apply_env_overrides()?;

    // Logging overrides
    if let Ok(val) = std::env::var("CHATMASK_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CHATMASK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("CHATMASK_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::models::SubstitutionMethod;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        temp_file.flush().unwrap();
        temp_file
    }

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("CHATMASK_TEST_SUBST_DIR", "/tmp/chatmask");
        let input = "path = \"${CHATMASK_TEST_SUBST_DIR}/chatgpt.json\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "path = \"/tmp/chatmask/chatgpt.json\"\n");
        std::env::remove_var("CHATMASK_TEST_SUBST_DIR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("CHATMASK_TEST_MISSING_VAR");
        let input = "path = \"${CHATMASK_TEST_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("CHATMASK_TEST_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# path = \"${CHATMASK_TEST_NEVER_SET}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("nonexistent-chatmask.toml").unwrap_err();
        assert!(matches!(err, MaskError::Configuration(_)));
    }

    #[test]
    fn test_load_config_valid() {
        let temp_file = write_config(
            r#"
[application]
log_level = "debug"

[server]
port = 8080

[store]
path = "data/mappings.json"
concrete_context_prefixes = ["https://chatgpt.com/c/", "https://chatgpt.com/g/"]

[anonymization]
method = "fake"
entities = ["PERSON", "EMAIL_ADDRESS"]
"#,
        );

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.store.path, PathBuf::from("data/mappings.json"));
        assert_eq!(config.store.concrete_context_prefixes.len(), 2);
        assert_eq!(config.anonymization.method, SubstitutionMethod::Surrogate);
        assert_eq!(config.anonymization.entities.len(), 2);
    }

    #[test]
    fn test_load_config_invalid_values() {
        let temp_file = write_config("[logging]\nlocal_rotation = \"weekly\"\n");
        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn test_load_config_bad_toml() {
        let temp_file = write_config("[server\nport = 1");
        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }
}
