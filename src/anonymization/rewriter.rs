//! Text rewriting
//!
//! Applies a resolved replacement map to the spans of the original text. The
//! result is identical to splicing each span from the highest offset down,
//! but is built in a single copy pass so large documents are not rebuilt once
//! per span.

use crate::anonymization::models::{validate_spans, Span};
use crate::domain::{MaskError, Result};
use indexmap::IndexMap;

/// Produce the anonymized text
///
/// `value_map` goes from original value to replacement and must cover every
/// span's substring. Bytes outside the spans are copied unchanged.
pub fn rewrite(text: &str, value_map: &IndexMap<String, String>, spans: &[Span]) -> Result<String> {
    let ordered = validate_spans(text, spans)?;

    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;

    for span in &ordered {
        let original = span.slice(text)?;
        let replacement = value_map.get(original).ok_or_else(|| {
            MaskError::InvariantViolation(format!(
                "No replacement planned for span {}..{} ({})",
                span.start, span.end, span.entity_type
            ))
        })?;

        output.push_str(&text[cursor..span.start]);
        output.push_str(replacement);
        cursor = span.end;
    }
    output.push_str(&text[cursor..]);

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::models::EntityType;

    fn map(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_rewrite_example_scenario() {
        let text = "Call John at 555-1234";
        let spans = vec![
            Span::new(13, 21, EntityType::PhoneNumber),
            Span::new(5, 9, EntityType::Person),
        ];
        let value_map = map(&[
            ("John", "[REDACTED_PERSON]"),
            ("555-1234", "[REDACTED_PHONE_NUMBER]"),
        ]);

        let result = rewrite(text, &value_map, &spans).unwrap();
        assert_eq!(result, "Call [REDACTED_PERSON] at [REDACTED_PHONE_NUMBER]");
    }

    #[test]
    fn test_rewrite_matches_descending_splice() {
        let text = "Ana wrote to Ana about Bob.";
        let spans = vec![
            Span::new(0, 3, EntityType::Person),
            Span::new(13, 16, EntityType::Person),
            Span::new(23, 26, EntityType::Person),
        ];
        let value_map = map(&[("Ana", "Maria Lopez"), ("Bob", "X")]);

        let mut expected = text.to_string();
        let mut descending = spans.clone();
        descending.sort_by(|a, b| b.start.cmp(&a.start));
        for span in &descending {
            let replacement = &value_map[&text[span.start..span.end]];
            expected.replace_range(span.start..span.end, replacement);
        }

        assert_eq!(rewrite(text, &value_map, &spans).unwrap(), expected);
        assert_eq!(expected, "Maria Lopez wrote to Maria Lopez about X.");
    }

    #[test]
    fn test_rewrite_without_spans_is_identity() {
        let text = "nothing sensitive here";
        assert_eq!(rewrite(text, &IndexMap::new(), &[]).unwrap(), text);
    }

    #[test]
    fn test_rewrite_preserves_multibyte_text() {
        let text = "Señor José llamó";
        let start = text.find("José").unwrap();
        let spans = vec![Span::new(start, start + "José".len(), EntityType::Person)];
        let value_map = map(&[("José", "[REDACTED_PERSON]")]);

        assert_eq!(
            rewrite(text, &value_map, &spans).unwrap(),
            "Señor [REDACTED_PERSON] llamó"
        );
    }

    #[test]
    fn test_rewrite_rejects_unplanned_span() {
        let text = "Call John";
        let spans = vec![Span::new(5, 9, EntityType::Person)];
        let err = rewrite(text, &IndexMap::new(), &spans).unwrap_err();
        assert!(matches!(err, MaskError::InvariantViolation(_)));
    }
}
