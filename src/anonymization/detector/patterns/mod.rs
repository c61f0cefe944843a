//! Pattern library for span detection

use crate::anonymization::models::EntityType;
use crate::domain::context::ResultExt;
use crate::domain::{MaskError, Result};
use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDefinition {
    /// Regex patterns for this category
    pub patterns: Vec<String>,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
    /// Entity type label
    pub category: String,
}

/// Compiled pattern with metadata
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Name of the library entry this regex came from
    pub name: String,
    /// Compiled regex
    pub regex: Regex,
    /// Entity type emitted for matches
    pub entity_type: EntityType,
    /// Confidence score
    pub confidence: f32,
}

impl CompiledPattern {
    /// Byte range of the sensitive part of each match
    ///
    /// Capture group 1 when the regex defines one, the whole match otherwise.
    pub fn find_ranges(&self, text: &str) -> Vec<(usize, usize)> {
        let group = usize::from(self.regex.captures_len() > 1);
        self.regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(group))
            .map(|m| (m.start(), m.end()))
            .collect()
    }
}

/// Pattern library container
///
/// Entries keep their file order so that detection is reproducible.
#[derive(Debug, Deserialize)]
struct PatternLibrary {
    patterns: IndexMap<String, PatternDefinition>,
}

/// Pattern registry for span detection
pub struct PatternRegistry {
    patterns: Vec<CompiledPattern>,
    patterns_by_type: HashMap<EntityType, Vec<CompiledPattern>>,
}

impl PatternRegistry {
    /// Create a new pattern registry from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read pattern library: {}",
                path.as_ref().display()
            )
        })?;

        Self::from_toml(&content)
    }

    /// Create a pattern registry from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary = toml::from_str(content).map_err(|e| {
            MaskError::Configuration(format!("Failed to parse pattern library TOML: {e}"))
        })?;

        let mut patterns = Vec::new();
        let mut patterns_by_type: HashMap<EntityType, Vec<CompiledPattern>> = HashMap::new();

        for (name, def) in library.patterns {
            if def.category.trim().is_empty() {
                return Err(MaskError::Configuration(format!(
                    "Pattern '{name}' has an empty category"
                )));
            }
            if !(0.0..=1.0).contains(&def.confidence) {
                return Err(MaskError::Configuration(format!(
                    "Pattern '{name}' confidence must be between 0.0 and 1.0"
                )));
            }
            let entity_type = EntityType::from(def.category.as_str());

            for pattern_str in &def.patterns {
                let regex = Regex::new(pattern_str).map_err(|e| {
                    MaskError::Configuration(format!(
                        "Invalid regex in pattern '{name}': {pattern_str}: {e}"
                    ))
                })?;

                let compiled = CompiledPattern {
                    name: name.clone(),
                    regex,
                    entity_type: entity_type.clone(),
                    confidence: def.confidence,
                };

                patterns.push(compiled.clone());
                patterns_by_type
                    .entry(entity_type.clone())
                    .or_default()
                    .push(compiled);
            }
        }

        Ok(Self {
            patterns,
            patterns_by_type,
        })
    }

    /// Create a default pattern registry with built-in patterns
    pub fn default_patterns() -> Result<Self> {
        let default_toml = include_str!("../../../../patterns/entity_patterns.toml");
        Self::from_toml(default_toml)
    }

    /// Get all patterns
    pub fn all_patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    /// Get patterns for a specific entity type
    pub fn patterns_for_type(&self, entity_type: &EntityType) -> Option<&[CompiledPattern]> {
        self.patterns_by_type
            .get(entity_type)
            .map(|v| v.as_slice())
    }

    /// Entity types this registry can emit
    pub fn entity_types(&self) -> Vec<EntityType> {
        let mut types: Vec<EntityType> = Vec::new();
        for pattern in &self.patterns {
            if !types.contains(&pattern.entity_type) {
                types.push(pattern.entity_type.clone());
            }
        }
        types
    }
}
