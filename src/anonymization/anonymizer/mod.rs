//! Replacement strategy module
//!
//! Provides the strategies the planner uses to turn an original value into
//! its replacement: fixed redaction labels or generated surrogates.

pub mod redaction;
pub mod surrogate;

use crate::anonymization::models::{EntityType, SubstitutionMethod};
use crate::domain::Result;

pub use redaction::RedactionStrategy;
pub use surrogate::{FakerSurrogateGenerator, SurrogateGenerator, SurrogateStrategy};

/// Trait for replacement strategy implementations
pub trait Anonymizer: Send + Sync {
    /// Compute a replacement for `original`, detected as `entity_type`
    fn replacement(&mut self, entity_type: &EntityType, original: &str) -> Result<String>;

    /// Whether repeated calls with the same input always return the same value
    fn is_deterministic(&self) -> bool;
}

/// Build the strategy for a substitution method
pub fn strategy_for<'a>(
    method: SubstitutionMethod,
    generator: &'a dyn SurrogateGenerator,
) -> Box<dyn Anonymizer + 'a> {
    match method {
        SubstitutionMethod::Redact => Box::new(RedactionStrategy::new()),
        SubstitutionMethod::Surrogate => Box::new(SurrogateStrategy::new(generator)),
    }
}
