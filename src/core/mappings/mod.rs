//! Context-scoped mapping history
//!
//! - [`store`] - the persisted document and the generic-to-concrete promotion rule
//! - [`manager`] - locking and failure policy around a storage backend
//! - [`reversal`] - context resolution and newest-first replay

pub mod manager;
pub mod reversal;
pub mod store;

pub use manager::{AppendReport, MappingManager};
pub use reversal::{Reversal, ReversalEngine};
pub use store::{AppendOutcome, ContextPolicy, MappingStore};
