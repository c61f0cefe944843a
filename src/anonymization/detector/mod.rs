//! Span detection module
//!
//! Provides the trait-based detection interface and the built-in regex
//! implementation for locating sensitive values in free text.

pub mod patterns;
pub mod regex;

use crate::anonymization::models::{EntityType, Span};
use crate::domain::Result;

pub use self::regex::RegexDetector;
pub use patterns::PatternRegistry;

/// Trait for span detection implementations
pub trait SpanDetector: Send + Sync {
    /// Detect spans of the allowed entity types in `text`
    ///
    /// Returned spans use byte offsets on character boundaries and must not
    /// overlap.
    fn detect(&self, text: &str, entities: &[EntityType]) -> Result<Vec<Span>>;

    /// Short name for logs
    fn name(&self) -> &str;
}
