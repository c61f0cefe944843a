//! Anonymization configuration
//!
//! Two layers live here:
//!
//! - [`AnonymizationConfig`]: the server-side defaults from `chatmask.toml`.
//! - [`ClientConfig`]: the per-request selection a client sends along with
//!   an anonymize call (sites, models, methods, PII categories). It is
//!   resolved into a [`ResolvedSelection`] and snapshotted into the stored
//!   mapping entry.

use crate::anonymization::models::{EntityType, SubstitutionMethod};
use crate::domain::{MaskError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// PII category names accepted from clients and the entity types they enable
const PII_CATEGORIES: [(&str, EntityType); 5] = [
    ("Names", EntityType::Person),
    ("Emails", EntityType::EmailAddress),
    ("Phone Numbers", EntityType::PhoneNumber),
    ("Addresses", EntityType::Location),
    ("SSN", EntityType::UsSsn),
];

/// Method name that selects surrogate values
const PSEUDONYMIZATION: &str = "Pseudonymization";

/// Server-side anonymization defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnonymizationConfig {
    /// Method used when a request names none
    #[serde(default)]
    pub method: SubstitutionMethod,

    /// Entity types detected when a request names none; empty means all known
    #[serde(default)]
    pub entities: Vec<EntityType>,

    /// Path to a custom pattern library TOML file
    #[serde(default)]
    pub pattern_library: Option<PathBuf>,

    /// Minimum pattern confidence for a detection to count
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,

    /// Audit logging configuration
    #[serde(default)]
    pub audit: AuditConfig,
}

impl Default for AnonymizationConfig {
    fn default() -> Self {
        Self {
            method: SubstitutionMethod::default(),
            entities: Vec::new(),
            pattern_library: None,
            min_confidence: default_min_confidence(),
            audit: AuditConfig::default(),
        }
    }
}

impl AnonymizationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if let Some(ref path) = self.pattern_library {
            if !path.exists() {
                return Err(format!("Pattern library file not found: {}", path.display()));
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                return Err(format!(
                    "Pattern library must be a TOML file: {}",
                    path.display()
                ));
            }
        }

        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(format!(
                "anonymization.min_confidence must be between 0.0 and 1.0, got {}",
                self.min_confidence
            ));
        }

        self.audit
            .validate()
            .map_err(|e| format!("Invalid audit configuration: {e}"))
    }

    /// Entity types used when a request does not restrict them
    pub fn default_entities(&self) -> Vec<EntityType> {
        if self.entities.is_empty() {
            EntityType::all_known()
        } else {
            self.entities.clone()
        }
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("CHATMASK_ANONYMIZATION_METHOD") {
            self.method = val.parse().map_err(|_| {
                MaskError::Configuration(format!("Invalid CHATMASK_ANONYMIZATION_METHOD: {val}"))
            })?;
        }

        if let Ok(val) = std::env::var("CHATMASK_ANONYMIZATION_ENTITIES") {
            self.entities = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(EntityType::from)
                .collect();
        }

        if let Ok(val) = std::env::var("CHATMASK_ANONYMIZATION_PATTERN_LIBRARY") {
            self.pattern_library = Some(PathBuf::from(val));
        }

        if let Ok(val) = std::env::var("CHATMASK_ANONYMIZATION_MIN_CONFIDENCE") {
            self.min_confidence = val.parse().map_err(|_| {
                MaskError::Configuration(format!(
                    "Invalid CHATMASK_ANONYMIZATION_MIN_CONFIDENCE: {val}"
                ))
            })?;
        }

        self.audit.apply_env_overrides()
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/anonymization.log")
}

fn default_min_confidence() -> f32 {
    0.5
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            return Err("audit log_path cannot be empty when audit is enabled".to_string());
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("CHATMASK_ANONYMIZATION_AUDIT_ENABLED") {
            self.enabled = val.parse().map_err(|_| {
                MaskError::Configuration(format!(
                    "Invalid CHATMASK_ANONYMIZATION_AUDIT_ENABLED value: {val}"
                ))
            })?;
        }

        if let Ok(val) = std::env::var("CHATMASK_ANONYMIZATION_AUDIT_LOG_PATH") {
            self.log_path = PathBuf::from(val);
        }

        Ok(())
    }
}

/// Selection sent by a client with an anonymize call
///
/// All four lists are required on the wire; they may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Sites the client extension is active on
    pub sites: Vec<String>,
    /// Models the client talks to
    pub models: Vec<String>,
    /// Anonymization methods, e.g. `Redaction` or `Pseudonymization`
    pub methods: Vec<String>,
    /// PII categories, e.g. `Names`, `Emails`
    pub piis: Vec<String>,
}

/// Typed form of a [`ClientConfig`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSelection {
    /// Substitution method implied by `methods`
    pub method: SubstitutionMethod,
    /// Entity types implied by `piis`
    pub entities: Vec<EntityType>,
}

impl ClientConfig {
    /// Parse and check a raw JSON payload
    ///
    /// Missing or mistyped fields are reported as invalid input naming the
    /// offending field.
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            MaskError::InvalidInput("config must be a JSON object".to_string())
        })?;

        let missing: Vec<&str> = ["sites", "models", "methods", "piis"]
            .into_iter()
            .filter(|field| !object.contains_key(*field))
            .collect();
        if !missing.is_empty() {
            return Err(MaskError::InvalidInput(format!(
                "Missing config fields: {}",
                missing.join(", ")
            )));
        }

        serde_json::from_value(value.clone())
            .map_err(|e| MaskError::InvalidInput(format!("Invalid config: {e}")))
    }

    /// Resolve the method and entity types this selection asks for
    ///
    /// Unknown PII names are ignored. A selection with no recognised PII
    /// name falls back to all five client categories.
    pub fn resolve(&self) -> ResolvedSelection {
        let method = if self.methods.iter().any(|m| m == PSEUDONYMIZATION) {
            SubstitutionMethod::Surrogate
        } else {
            SubstitutionMethod::Redact
        };

        let mut entities: Vec<EntityType> = Vec::new();
        for pii in &self.piis {
            let selected = PII_CATEGORIES
                .iter()
                .find(|(name, _)| *name == pii.as_str())
                .map(|(_, entity)| entity);
            if let Some(entity) = selected {
                if !entities.contains(entity) {
                    entities.push(entity.clone());
                }
            }
        }
        if entities.is_empty() {
            entities = PII_CATEGORIES.iter().map(|(_, e)| e.clone()).collect();
        }

        ResolvedSelection { method, entities }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn client(methods: &[&str], piis: &[&str]) -> ClientConfig {
        ClientConfig {
            sites: vec!["chatgpt.com".into()],
            models: vec!["gpt-4o".into()],
            methods: methods.iter().map(|s| s.to_string()).collect(),
            piis: piis.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_default_config() {
        let config = AnonymizationConfig::default();
        assert_eq!(config.method, SubstitutionMethod::Redact);
        assert!(config.entities.is_empty());
        assert_eq!(config.default_entities().len(), 10);
        assert!(!config.audit.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_pattern_library_is_rejected() {
        let config = AnonymizationConfig {
            pattern_library: Some(PathBuf::from("/nonexistent/patterns.toml")),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().contains("not found"));
    }

    #[test]
    fn test_confidence_out_of_range_is_rejected() {
        let config = AnonymizationConfig {
            min_confidence: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_entities_deserialize_from_labels() {
        let config: AnonymizationConfig =
            toml::from_str(r#"entities = ["PERSON", "EMAIL"]"#).unwrap();
        assert_eq!(
            config.entities,
            vec![EntityType::Person, EntityType::EmailAddress]
        );
    }

    #[test_case(&["Redaction"], SubstitutionMethod::Redact ; "redaction")]
    #[test_case(&["Pseudonymization"], SubstitutionMethod::Surrogate ; "pseudonymization")]
    #[test_case(&["Redaction", "Pseudonymization"], SubstitutionMethod::Surrogate ; "both")]
    #[test_case(&[], SubstitutionMethod::Redact ; "none")]
    fn test_method_resolution(methods: &[&str], expected: SubstitutionMethod) {
        assert_eq!(client(methods, &["Names"]).resolve().method, expected);
    }

    #[test]
    fn test_pii_resolution() {
        let resolved = client(&[], &["Emails", "Names", "Emails", "Shoe Size"]).resolve();
        assert_eq!(
            resolved.entities,
            vec![EntityType::EmailAddress, EntityType::Person]
        );
    }

    #[test]
    fn test_unrecognised_pii_falls_back_to_client_categories() {
        let resolved = client(&[], &["Shoe Size"]).resolve();
        assert_eq!(
            resolved.entities,
            vec![
                EntityType::Person,
                EntityType::EmailAddress,
                EntityType::PhoneNumber,
                EntityType::Location,
                EntityType::UsSsn,
            ]
        );
    }

    #[test]
    fn test_from_value_reports_missing_fields() {
        let err = ClientConfig::from_value(&json!({"sites": [], "piis": []})).unwrap_err();
        assert!(err.is_client_error());
        assert!(err.to_string().contains("models, methods"));
    }

    #[test]
    fn test_from_value_rejects_wrong_types() {
        let err = ClientConfig::from_value(
            &json!({"sites": [], "models": [], "methods": "Redaction", "piis": []}),
        )
        .unwrap_err();
        assert!(err.is_client_error());
    }
}
