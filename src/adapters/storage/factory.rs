//! Mapping storage factory
//!
//! This module provides a factory function to create the storage backend
//! named by configuration.

use super::json_file::JsonFileStorage;
use super::memory::InMemoryStorage;
use super::traits::MappingStorage;
use crate::config::schema::{StoreBackend, StoreConfig};
use std::sync::Arc;

/// Create a mapping storage based on the configuration
///
/// # Returns
///
/// Returns an Arc-wrapped trait object that implements MappingStorage
pub fn create_mapping_storage(config: &StoreConfig) -> Arc<dyn MappingStorage> {
    match config.backend {
        StoreBackend::Json => {
            tracing::info!(path = %config.path.display(), "Creating JSON file mapping storage");
            Arc::new(JsonFileStorage::new(config.path.clone()))
        }
        StoreBackend::Memory => {
            tracing::info!("Creating in-memory mapping storage");
            Arc::new(InMemoryStorage::new())
        }
    }
}
