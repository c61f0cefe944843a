//! In-memory mapping storage, for tests and throwaway sessions

use super::traits::MappingStorage;
use crate::core::mappings::store::MappingStore;
use crate::domain::{MaskError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Mapping storage that keeps the store in process memory
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    store: Mutex<MappingStore>,
    fail_saves: AtomicBool,
}

impl InMemoryStorage {
    /// Create an empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent saves fail, to exercise persistence error paths
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MappingStore> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl MappingStorage for InMemoryStorage {
    async fn load(&self) -> Result<MappingStore> {
        Ok(self.lock().clone())
    }

    async fn save(&self, store: &MappingStore) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(MaskError::Persistence(
                "in-memory storage configured to fail".to_string(),
            ));
        }
        *self.lock() = store.clone();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
