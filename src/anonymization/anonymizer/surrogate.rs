//! Surrogate (pseudonymization) strategy
//!
//! Surrogate values come from a [`SurrogateGenerator`]. The default
//! [`FakerSurrogateGenerator`] draws realistic values from the `fake` crate;
//! callers can plug in their own generator through the trait.

use super::Anonymizer;
use crate::anonymization::models::EntityType;
use crate::domain::Result;
use fake::faker::address::en::CityName;
use fake::faker::chrono::en::Date;
use fake::faker::creditcard::en::CreditCardNumber;
use fake::faker::internet::en::{IPv4, SafeEmail};
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Produces a realistic replacement value for an entity type
///
/// Implementations need not be deterministic; the planner guarantees that a
/// value seen twice in one call reuses its first replacement.
pub trait SurrogateGenerator: Send + Sync {
    /// Generate a replacement for `original`
    fn generate(&self, entity_type: &EntityType, original: &str) -> Result<String>;
}

/// Surrogate generator backed by the `fake` crate
pub struct FakerSurrogateGenerator {
    rng: Mutex<StdRng>,
}

impl FakerSurrogateGenerator {
    /// Create a generator seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a reproducible generator
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for FakerSurrogateGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SurrogateGenerator for FakerSurrogateGenerator {
    fn generate(&self, entity_type: &EntityType, _original: &str) -> Result<String> {
        let mut guard = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let rng = &mut *guard;

        let value = match entity_type {
            EntityType::Person => Name().fake_with_rng::<String, _>(rng),
            EntityType::EmailAddress => SafeEmail().fake_with_rng::<String, _>(rng),
            EntityType::PhoneNumber => PhoneNumber().fake_with_rng::<String, _>(rng),
            EntityType::CreditCard => CreditCardNumber().fake_with_rng::<String, _>(rng),
            EntityType::UsSsn => format!(
                "{:03}-{:02}-{:04}",
                rng.gen_range(100..900),
                rng.gen_range(1..100),
                rng.gen_range(1..10000)
            ),
            EntityType::UsBankNumber => (0..12)
                .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
                .collect(),
            EntityType::Location => CityName().fake_with_rng::<String, _>(rng),
            EntityType::IpAddress => IPv4().fake_with_rng::<String, _>(rng),
            EntityType::DateTime => Date()
                .fake_with_rng::<chrono::NaiveDate, _>(rng)
                .format("%Y-%m-%d")
                .to_string(),
            other => format!("FAKE_{}", other.label()),
        };

        Ok(value)
    }
}

/// Adapts a [`SurrogateGenerator`] to the [`Anonymizer`] interface
pub struct SurrogateStrategy<'a> {
    generator: &'a dyn SurrogateGenerator,
}

impl<'a> SurrogateStrategy<'a> {
    /// Create a new surrogate strategy
    pub fn new(generator: &'a dyn SurrogateGenerator) -> Self {
        Self { generator }
    }
}

impl Anonymizer for SurrogateStrategy<'_> {
    fn replacement(&mut self, entity_type: &EntityType, original: &str) -> Result<String> {
        self.generator.generate(entity_type, original)
    }

    fn is_deterministic(&self) -> bool {
        false
    }
}
