//! Substitution methods and persisted mapping entries

use crate::domain::MaskError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// How detected values are replaced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubstitutionMethod {
    /// Replace with a fixed `[REDACTED_<TYPE>]` label
    #[default]
    #[serde(rename = "redact")]
    Redact,
    /// Replace with a realistic fake value (pseudonymization)
    #[serde(rename = "fake", alias = "surrogate")]
    Surrogate,
}

impl SubstitutionMethod {
    /// Wire name as stored in the mapping file
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Redact => "redact",
            Self::Surrogate => "fake",
        }
    }
}

impl FromStr for SubstitutionMethod {
    type Err = MaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "redact" => Ok(Self::Redact),
            "fake" | "surrogate" => Ok(Self::Surrogate),
            _ => Err(MaskError::InvalidInput(format!(
                "Invalid anonymization method '{s}'. Use 'redact' or 'fake'"
            ))),
        }
    }
}

impl fmt::Display for SubstitutionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One anonymization call's recorded substitution
///
/// `mapping` goes from replacement to original value. Entries are never
/// modified once appended to a context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Method used for every replacement in this entry
    pub anonymization_method: SubstitutionMethod,
    /// Replacement -> original
    #[serde(default)]
    pub mapping: IndexMap<String, String>,
    /// Snapshot of the configuration in effect for the call
    #[serde(default = "empty_config")]
    pub config: Value,
}

fn empty_config() -> Value {
    Value::Object(Default::default())
}

impl MappingEntry {
    /// Create a new mapping entry
    pub fn new(method: SubstitutionMethod, mapping: IndexMap<String, String>, config: Value) -> Self {
        Self {
            anonymization_method: method,
            mapping,
            config,
        }
    }

    /// Number of replacement pairs
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// True when the call replaced nothing
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}
