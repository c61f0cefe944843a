//! Mapping storage backends
//!
//! This module provides a trait-based abstraction for persisting the mapping
//! store, with a JSON file backend and an in-memory backend.

pub mod factory;
pub mod json_file;
pub mod memory;
pub mod traits;

pub use factory::create_mapping_storage;
pub use json_file::JsonFileStorage;
pub use memory::InMemoryStorage;
pub use traits::MappingStorage;
