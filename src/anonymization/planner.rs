//! Replacement planning
//!
//! Turns a text and its detected spans into a consistent substitution for a
//! single anonymization call: every distinct original value gets exactly one
//! replacement, and every replacement points back to exactly one original.

use crate::anonymization::anonymizer::{strategy_for, Anonymizer, SurrogateGenerator};
use crate::anonymization::models::{validate_spans, EntityType, Span, SubstitutionMethod};
use crate::domain::Result;
use indexmap::IndexMap;

/// Number of extra generator calls before falling back to an ordinal suffix
const SURROGATE_RETRIES: usize = 3;

/// Resolved substitution for one call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplacementPlan {
    /// Original -> replacement, in order of first appearance
    pub value_map: IndexMap<String, String>,
    /// Replacement -> original, in order of first appearance
    pub reverse_map: IndexMap<String, String>,
    /// Entity type that governed each original (first occurrence wins)
    pub entity_types: IndexMap<String, EntityType>,
}

impl ReplacementPlan {
    /// Replacement chosen for an original value
    pub fn replacement_for(&self, original: &str) -> Option<&str> {
        self.value_map.get(original).map(String::as_str)
    }

    /// Number of distinct originals
    pub fn len(&self) -> usize {
        self.value_map.len()
    }

    /// True when nothing was planned
    pub fn is_empty(&self) -> bool {
        self.value_map.is_empty()
    }
}

/// Builds [`ReplacementPlan`]s for a substitution method
pub struct ReplacementPlanner<'a> {
    method: SubstitutionMethod,
    generator: &'a dyn SurrogateGenerator,
}

impl<'a> ReplacementPlanner<'a> {
    /// Create a planner; `generator` is only consulted for surrogates
    pub fn new(method: SubstitutionMethod, generator: &'a dyn SurrogateGenerator) -> Self {
        Self { method, generator }
    }

    /// Plan replacements for `spans` over `text`
    ///
    /// Spans are processed by ascending start offset. The first occurrence of
    /// an original value decides its entity type and replacement; later
    /// occurrences, even under another entity type, reuse it.
    pub fn plan(&self, text: &str, spans: &[Span]) -> Result<ReplacementPlan> {
        let ordered = validate_spans(text, spans)?;
        let mut strategy = strategy_for(self.method, self.generator);
        let mut plan = ReplacementPlan::default();

        for span in &ordered {
            let original = span.slice(text)?;
            if plan.value_map.contains_key(original) {
                continue;
            }

            let replacement =
                Self::unique_replacement(strategy.as_mut(), &plan, &span.entity_type, original)?;

            plan.value_map
                .insert(original.to_string(), replacement.clone());
            plan.reverse_map
                .insert(replacement, original.to_string());
            plan.entity_types
                .insert(original.to_string(), span.entity_type.clone());
        }

        tracing::debug!(
            method = %self.method,
            spans = ordered.len(),
            distinct_values = plan.len(),
            "Planned replacements"
        );

        Ok(plan)
    }

    /// Compute a replacement that is not already claimed by another original
    fn unique_replacement(
        strategy: &mut dyn Anonymizer,
        plan: &ReplacementPlan,
        entity_type: &EntityType,
        original: &str,
    ) -> Result<String> {
        let mut candidate = strategy.replacement(entity_type, original)?;
        if !Self::is_taken(plan, &candidate) {
            return Ok(candidate);
        }

        if !strategy.is_deterministic() {
            for _ in 0..SURROGATE_RETRIES {
                candidate = strategy.replacement(entity_type, original)?;
                if !Self::is_taken(plan, &candidate) {
                    return Ok(candidate);
                }
            }
        }

        let mut ordinal = 2;
        loop {
            let suffixed = with_ordinal(&candidate, ordinal);
            if !Self::is_taken(plan, &suffixed) {
                return Ok(suffixed);
            }
            ordinal += 1;
        }
    }

    fn is_taken(plan: &ReplacementPlan, replacement: &str) -> bool {
        plan.reverse_map.contains_key(replacement)
    }
}

/// `[REDACTED_PERSON]` -> `[REDACTED_PERSON_2]`, `Jane Roe` -> `Jane Roe_2`
fn with_ordinal(base: &str, ordinal: usize) -> String {
    match base.strip_suffix(']') {
        Some(head) if base.starts_with('[') => format!("{head}_{ordinal}]"),
        _ => format!("{base}_{ordinal}"),
    }
}
