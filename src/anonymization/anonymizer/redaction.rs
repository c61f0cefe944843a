//! Redaction strategy

use super::Anonymizer;
use crate::anonymization::models::EntityType;
use crate::domain::Result;

/// Redaction strategy - replaces values with `[REDACTED_<TYPE>]` labels
pub struct RedactionStrategy;

impl RedactionStrategy {
    /// Create a new redaction strategy
    pub fn new() -> Self {
        Self
    }

    /// The label for an entity type
    pub fn label_for(entity_type: &EntityType) -> String {
        format!("[REDACTED_{}]", entity_type.label())
    }
}

impl Anonymizer for RedactionStrategy {
    fn replacement(&mut self, entity_type: &EntityType, _original: &str) -> Result<String> {
        Ok(Self::label_for(entity_type))
    }

    fn is_deterministic(&self) -> bool {
        true
    }
}

impl Default for RedactionStrategy {
    fn default() -> Self {
        Self::new()
    }
}
