//! Detected sensitive spans

use super::entity::EntityType;
use crate::domain::{MaskError, Result};
use serde::{Deserialize, Serialize};

/// A detected sensitive region of a text snapshot
///
/// `start` and `end` are byte offsets into the UTF-8 text (`end` exclusive)
/// and must fall on character boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start offset
    pub start: usize,
    /// Exclusive end offset
    pub end: usize,
    /// Kind of value covered
    pub entity_type: EntityType,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, entity_type: EntityType) -> Self {
        Self {
            start,
            end,
            entity_type,
        }
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True when the span covers nothing
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether two spans share at least one byte
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Borrow the covered substring, checking bounds and char boundaries
    pub fn slice<'a>(&self, text: &'a str) -> Result<&'a str> {
        if self.start >= self.end {
            return Err(MaskError::InvariantViolation(format!(
                "Span {}..{} ({}) is empty or inverted",
                self.start, self.end, self.entity_type
            )));
        }
        text.get(self.start..self.end).ok_or_else(|| {
            MaskError::InvariantViolation(format!(
                "Span {}..{} ({}) is out of bounds or splits a character (text length {})",
                self.start,
                self.end,
                self.entity_type,
                text.len()
            ))
        })
    }
}

/// Check spans against `text` and return them ordered by ascending start
///
/// Fails on empty, inverted, out-of-bounds, boundary-splitting or
/// overlapping spans.
pub fn validate_spans(text: &str, spans: &[Span]) -> Result<Vec<Span>> {
    let mut ordered = spans.to_vec();
    ordered.sort_by_key(|s| (s.start, s.end));

    for span in &ordered {
        span.slice(text)?;
    }

    for pair in ordered.windows(2) {
        if pair[0].overlaps(&pair[1]) {
            return Err(MaskError::InvariantViolation(format!(
                "Overlapping spans {}..{} ({}) and {}..{} ({})",
                pair[0].start,
                pair[0].end,
                pair[0].entity_type,
                pair[1].start,
                pair[1].end,
                pair[1].entity_type
            )));
        }
    }

    Ok(ordered)
}

/// Drop overlapping spans, keeping the earliest start and then the longest
///
/// Detectors that can emit competing matches normalize their output with
/// this before handing spans to the planner.
pub fn resolve_overlaps(mut spans: Vec<Span>) -> Vec<Span> {
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.len().cmp(&a.len())));

    let mut kept: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        if span.is_empty() {
            continue;
        }
        match kept.last() {
            Some(last) if span.start < last.end => continue,
            _ => kept.push(span),
        }
    }
    kept
}
