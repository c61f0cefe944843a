//! Regex-based span detector

use super::{patterns::PatternRegistry, SpanDetector};
use crate::anonymization::models::{resolve_overlaps, EntityType, Span};
use crate::domain::Result;
use std::sync::Arc;

/// Regex-based span detector
pub struct RegexDetector {
    pattern_registry: Arc<PatternRegistry>,
    confidence_threshold: f32,
}

impl RegexDetector {
    /// Create a new regex detector with default patterns
    pub fn new() -> Result<Self> {
        let registry = PatternRegistry::default_patterns()?;
        Ok(Self::with_registry(registry))
    }

    /// Create a new regex detector with custom pattern registry
    pub fn with_registry(registry: PatternRegistry) -> Self {
        Self {
            pattern_registry: Arc::new(registry),
            confidence_threshold: 0.5,
        }
    }

    /// Set the confidence threshold
    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Minimum pattern confidence that still produces spans
    pub fn confidence_threshold(&self) -> f32 {
        self.confidence_threshold
    }
}

impl SpanDetector for RegexDetector {
    fn detect(&self, text: &str, entities: &[EntityType]) -> Result<Vec<Span>> {
        let mut spans = Vec::new();

        for pattern in self.pattern_registry.all_patterns() {
            if pattern.confidence < self.confidence_threshold
                || !entities.contains(&pattern.entity_type)
            {
                continue;
            }

            for (start, end) in pattern.find_ranges(text) {
                spans.push(Span::new(start, end, pattern.entity_type.clone()));
            }
        }

        let raw = spans.len();
        let spans = resolve_overlaps(spans);
        tracing::debug!(
            candidates = raw,
            spans = spans.len(),
            "Regex detection complete"
        );

        Ok(spans)
    }

    fn name(&self) -> &str {
        "regex"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::models::validate_spans;

    fn detect(text: &str, entities: &[EntityType]) -> Vec<(String, EntityType)> {
        let detector = RegexDetector::new().unwrap();
        detector
            .detect(text, entities)
            .unwrap()
            .into_iter()
            .map(|s| (text[s.start..s.end].to_string(), s.entity_type))
            .collect()
    }

    #[test]
    fn test_detect_example_scenario() {
        let found = detect("Call John at 555-1234", &EntityType::all_known());
        assert_eq!(
            found,
            vec![
                ("John".to_string(), EntityType::Person),
                ("555-1234".to_string(), EntityType::PhoneNumber),
            ]
        );
    }

    #[test]
    fn test_detect_email_and_phone() {
        let found = detect(
            "Contact: john.doe@example.com or (555) 123-4567",
            &EntityType::all_known(),
        );
        assert!(found.contains(&("john.doe@example.com".to_string(), EntityType::EmailAddress)));
        assert!(found.contains(&("(555) 123-4567".to_string(), EntityType::PhoneNumber)));
    }

    #[test]
    fn test_only_allowed_types_are_reported() {
        let found = detect(
            "Mail jane@example.com, SSN 123-45-6789",
            &[EntityType::UsSsn],
        );
        assert_eq!(found, vec![("123-45-6789".to_string(), EntityType::UsSsn)]);
    }

    #[test]
    fn test_output_never_overlaps() {
        let text = "Call 555-123-4567 or 192.168.1.10 on 2024-01-15, card 4111 1111 1111 1111";
        let detector = RegexDetector::new().unwrap();
        let spans = detector.detect(text, &EntityType::all_known()).unwrap();

        assert!(validate_spans(text, &spans).is_ok());
        assert!(spans
            .iter()
            .any(|s| &text[s.start..s.end] == "555-123-4567"));
    }

    #[test]
    fn test_threshold_filters_low_confidence_patterns() {
        let detector = RegexDetector::new()
            .unwrap()
            .with_confidence_threshold(0.9);
        let spans = detector
            .detect("Call John at 555-1234", &EntityType::all_known())
            .unwrap();
        assert!(spans.is_empty());
    }

    #[test]
    fn test_no_entities_requested_means_no_spans() {
        assert!(detect("Call John at 555-1234", &[]).is_empty());
    }
}
