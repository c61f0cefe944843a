//! Anonymization data models

pub mod entity;
pub mod mapping;
pub mod span;

pub use entity::EntityType;
pub use mapping::{MappingEntry, SubstitutionMethod};
pub use span::{resolve_overlaps, validate_spans, Span};
