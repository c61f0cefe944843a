//! Reversal of stored substitutions
//!
//! Resolves which context to use for a de-anonymization request and replays
//! that context's history, newest entry first, to recover original values.

use super::store::MappingStore;
use crate::anonymization::models::{MappingEntry, SubstitutionMethod};
use crate::domain::{ContextKey, MaskError, Result};

/// Outcome of a reversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reversal {
    /// Text with every known replacement restored
    pub text: String,
    /// Method of the last entry processed, i.e. the oldest in the context
    pub method: SubstitutionMethod,
    /// Context actually used
    pub context: String,
    /// Number of entries replayed
    pub entries_applied: usize,
}

/// Replays a [`MappingStore`] against anonymized text
pub struct ReversalEngine<'a> {
    store: &'a MappingStore,
    generic: &'a ContextKey,
}

impl<'a> ReversalEngine<'a> {
    /// Create a reversal engine over a loaded store
    pub fn new(store: &'a MappingStore, generic: &'a ContextKey) -> Self {
        Self { store, generic }
    }

    /// Pick the context for `requested`
    ///
    /// Resolution order: exact match, then the generic key, then the last key
    /// in the store's creation order. A missing or blank request is treated as
    /// a request for the generic key. The last-key fallback is the most
    /// recently *created* context, which is not necessarily the one most
    /// recently appended to.
    pub fn resolve(&self, requested: Option<&str>) -> Result<(&'a str, &'a [MappingEntry])> {
        let requested = ContextKey::or_default(requested, self.generic);

        let key = if self.store.contains(requested.as_str()) {
            requested.as_str().to_string()
        } else if self.store.contains(self.generic.as_str()) {
            self.generic.as_str().to_string()
        } else if let Some(last) = self.store.last_key() {
            last.to_string()
        } else {
            return Err(MaskError::NotFound("No mappings found".to_string()));
        };

        match self.store.iter().find(|(k, _)| *k == key) {
            Some((k, entries)) if !entries.is_empty() => Ok((k, entries)),
            _ => Err(MaskError::NotFound(format!(
                "No mappings found for context: {key}"
            ))),
        }
    }

    /// Restore original values in `text`
    ///
    /// Entries are replayed newest first; within an entry every replacement
    /// is substituted globally with its original, longest replacement first.
    pub fn reverse(&self, text: &str, requested: Option<&str>) -> Result<Reversal> {
        let (context, entries) = self.resolve(requested)?;

        let mut restored = text.to_string();
        let mut method = SubstitutionMethod::default();

        for entry in entries.iter().rev() {
            method = entry.anonymization_method;

            let mut pairs: Vec<(&String, &String)> = entry.mapping.iter().collect();
            pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

            for (replacement, original) in pairs {
                if replacement.is_empty() {
                    continue;
                }
                restored = restored.replace(replacement.as_str(), original);
            }
        }

        tracing::debug!(
            context = %context,
            entries = entries.len(),
            method = %method,
            "Reversed text using stored mappings"
        );

        Ok(Reversal {
            text: restored,
            method,
            context: context.to_string(),
            entries_applied: entries.len(),
        })
    }
}
