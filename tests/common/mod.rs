//! Shared helpers for integration tests

#![allow(dead_code)]

use chatmask::anonymization::AnonymizationEngine;
use chatmask::config::{ChatmaskConfig, StoreBackend};
use std::path::Path;
use std::sync::Arc;

pub const GENERIC: &str = "https://chatgpt.com/";
pub const CONVERSATION: &str = "https://chatgpt.com/c/6f1c2a";

/// Configuration whose JSON store lives at `store_path`
pub fn file_config(store_path: &Path) -> ChatmaskConfig {
    let mut config = ChatmaskConfig::default();
    config.store.backend = StoreBackend::Json;
    config.store.path = store_path.to_path_buf();
    config
}

/// Engine backed by a JSON store at `store_path`
pub fn file_engine(store_path: &Path) -> AnonymizationEngine {
    AnonymizationEngine::from_config(&file_config(store_path)).expect("Failed to create engine")
}

/// Engine backed by an in-memory store
pub fn memory_engine() -> Arc<AnonymizationEngine> {
    let mut config = ChatmaskConfig::default();
    config.store.backend = StoreBackend::Memory;
    Arc::new(AnonymizationEngine::from_config(&config).expect("Failed to create engine"))
}
