//! Mapping storage abstraction
//!
//! This module defines the trait that mapping store backends must implement.

use crate::core::mappings::store::MappingStore;
use crate::domain::Result;
use async_trait::async_trait;

/// Mapping storage trait for store persistence
///
/// The whole store is read and written as one document. Callers are expected
/// to serialize load-mutate-save cycles; implementations only need to make
/// a single `save` atomic with respect to concurrent readers.
#[async_trait]
pub trait MappingStorage: Send + Sync {
    /// Load the full store
    ///
    /// # Returns
    ///
    /// Returns an empty store when nothing has been persisted yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted document exists but cannot be read
    /// or parsed.
    async fn load(&self) -> Result<MappingStore>;

    /// Persist the full store, replacing whatever was stored before
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    async fn save(&self, store: &MappingStore) -> Result<()>;

    /// Human-readable location of the backend, for logs and the CLI
    fn describe(&self) -> String;
}
