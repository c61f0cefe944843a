//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold `ENV_MUTEX`.

use chatmask::anonymization::{EntityType, SubstitutionMethod};
use chatmask::config::{load_config, StoreBackend};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    std::env::remove_var("CHATMASK_SERVER_PORT");
    std::env::remove_var("CHATMASK_STORE_PATH");
    std::env::remove_var("CHATMASK_ANONYMIZATION_METHOD");
    std::env::remove_var("CHATMASK_ANONYMIZATION_ENTITIES");
    std::env::remove_var("TEST_CHATMASK_STORE_DIR");
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"

[server]
host = "0.0.0.0"
port = 8080

[store]
backend = "json"
path = "/var/lib/chatmask/mappings.json"
generic_context = "https://claude.ai/"
concrete_context_prefixes = ["https://claude.ai/chat/"]

[anonymization]
method = "fake"
entities = ["PERSON", "EMAIL_ADDRESS"]
min_confidence = 0.7

[anonymization.audit]
enabled = true
log_path = "/var/log/chatmask/audit.log"

[logging]
local_enabled = true
local_path = "/var/log/chatmask"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
    assert_eq!(config.store.backend, StoreBackend::Json);
    assert_eq!(config.store.path, PathBuf::from("/var/lib/chatmask/mappings.json"));
    assert_eq!(config.store.generic_context, "https://claude.ai/");
    assert_eq!(config.anonymization.method, SubstitutionMethod::Surrogate);
    assert_eq!(
        config.anonymization.entities,
        vec![EntityType::Person, EntityType::EmailAddress]
    );
    assert!(config.anonymization.audit.enabled);
    assert_eq!(config.logging.local_rotation, "hourly");

    let policy = config.store.context_policy().unwrap();
    assert_eq!(policy.generic().as_str(), "https://claude.ai/");
}

#[test]
fn test_empty_file_yields_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
    cleanup_env_vars();

    let file = write_config("");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.server.port, 5000);
    assert_eq!(config.store.path, PathBuf::from("mappings/chatgpt.json"));
    assert_eq!(config.store.generic_context, "https://chatgpt.com/");
    assert_eq!(config.anonymization.method, SubstitutionMethod::Redact);
    assert_eq!(config.anonymization.default_entities().len(), 10);
    assert!(!config.anonymization.audit.enabled);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_CHATMASK_STORE_DIR", "/srv/chatmask");

    let file = write_config(
        r#"
[store]
path = "${TEST_CHATMASK_STORE_DIR}/mappings.json"
"#,
    );
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.store.path, PathBuf::from("/srv/chatmask/mappings.json"));

    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_is_an_error() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[store]
path = "${TEST_CHATMASK_STORE_DIR}/mappings.json"
"#,
    );
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_CHATMASK_STORE_DIR"));
}

#[test]
fn test_env_overrides_win_over_file() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
    cleanup_env_vars();
    std::env::set_var("CHATMASK_SERVER_PORT", "9090");
    std::env::set_var("CHATMASK_ANONYMIZATION_METHOD", "fake");
    std::env::set_var("CHATMASK_ANONYMIZATION_ENTITIES", "PERSON,PHONE_NUMBER");

    let file = write_config(
        r#"
[server]
port = 8080

[anonymization]
method = "redact"
"#,
    );
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.server.port, 9090);
    assert_eq!(config.anonymization.method, SubstitutionMethod::Surrogate);
    assert_eq!(
        config.anonymization.entities,
        vec![EntityType::Person, EntityType::PhoneNumber]
    );

    cleanup_env_vars();
}

#[test]
fn test_blank_entities_override_selects_all_known_types() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
    cleanup_env_vars();
    std::env::set_var("CHATMASK_ANONYMIZATION_ENTITIES", "");

    let file = write_config("[anonymization]\nentities = [\"PERSON\"]\n");
    let config = load_config(file.path()).unwrap();

    assert!(config.anonymization.entities.is_empty());
    assert_eq!(
        config.anonymization.default_entities(),
        EntityType::all_known()
    );

    cleanup_env_vars();
}

#[test]
fn test_invalid_values_are_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
    cleanup_env_vars();

    for content in [
        "[application]\nlog_level = \"loud\"",
        "[server]\nport = 0",
        "[anonymization]\nmin_confidence = 1.5",
        "[logging]\nlocal_rotation = \"weekly\"",
        "[store]\ngeneric_context = \"\"",
    ] {
        let file = write_config(content);
        assert!(
            load_config(file.path()).is_err(),
            "expected rejection for: {content}"
        );
    }
}

#[test]
fn test_missing_file_is_an_error() {
    let err = load_config("/nonexistent/chatmask.toml").unwrap_err();
    assert!(err.to_string().contains("Configuration file not found"));
}
