//! Mapping manager
//!
//! Wraps a [`MappingStorage`] backend with the locking and failure policy
//! the engine relies on:
//!
//! - `load` never fails: a missing or unreadable store is treated as empty
//!   and logged at `warn`.
//! - `save` never fails: errors are logged at `error` and reported as `false`.
//! - `append` holds the write lock across load, mutate and save, so two
//!   concurrent appends cannot lose each other's entries.
//! - Snapshot and reversal take the read lock and therefore never observe a
//!   half-finished append.

use super::reversal::{Reversal, ReversalEngine};
use super::store::{AppendOutcome, ContextPolicy, MappingStore};
use crate::adapters::storage::MappingStorage;
use crate::anonymization::models::MappingEntry;
use crate::domain::{ContextKey, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Result of an append, including whether it reached durable storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendReport {
    /// What happened to the in-memory store
    pub outcome: AppendOutcome,
    /// False when the save failed; the entry is then lost after this call
    pub persisted: bool,
}

/// Serializes access to the mapping store
pub struct MappingManager {
    /// Storage backend
    storage: Arc<dyn MappingStorage>,
    policy: ContextPolicy,
    lock: RwLock<()>,
}

impl MappingManager {
    /// Create a manager over `storage`
    pub fn new(storage: Arc<dyn MappingStorage>, policy: ContextPolicy) -> Self {
        Self {
            storage,
            policy,
            lock: RwLock::new(()),
        }
    }

    /// Context policy in effect
    pub fn policy(&self) -> &ContextPolicy {
        &self.policy
    }

    /// Description of the storage backend
    pub fn describe(&self) -> String {
        self.storage.describe()
    }

    /// Load the current store
    pub async fn load(&self) -> MappingStore {
        let _guard = self.lock.read().await;
        self.load_unlocked().await
    }

    /// Persist `store`, replacing the current one
    pub async fn save(&self, store: &MappingStore) -> bool {
        let _guard = self.lock.write().await;
        self.save_unlocked(store).await
    }

    /// Append `entry` under `key`, applying generic-context promotion
    pub async fn append(&self, key: &ContextKey, entry: MappingEntry) -> AppendReport {
        let _guard = self.lock.write().await;

        let mut store = self.load_unlocked().await;
        let outcome = store.append(key, entry, &self.policy);
        let persisted = self.save_unlocked(&store).await;

        tracing::info!(
            context = %outcome.context,
            entries = outcome.entries,
            promoted = outcome.promoted_from.is_some(),
            persisted,
            "Mapping entry appended"
        );

        AppendReport { outcome, persisted }
    }

    /// Full store, for listing
    pub async fn snapshot(&self) -> MappingStore {
        self.load().await
    }

    /// Restore original values in `text` using the history for `requested`
    pub async fn reverse(&self, text: &str, requested: Option<&str>) -> Result<Reversal> {
        let store = self.load().await;
        ReversalEngine::new(&store, self.policy.generic()).reverse(text, requested)
    }

    async fn load_unlocked(&self) -> MappingStore {
        match self.storage.load().await {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!(
                    backend = %self.storage.describe(),
                    error = %e,
                    "Mapping store unreadable, continuing with an empty store"
                );
                MappingStore::new()
            }
        }
    }

    async fn save_unlocked(&self, store: &MappingStore) -> bool {
        match self.storage.save(store).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    backend = %self.storage.describe(),
                    error = %e,
                    "Failed to persist mapping store"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryStorage;
    use crate::anonymization::models::SubstitutionMethod;
    use indexmap::IndexMap;
    use serde_json::json;

    const GENERIC: &str = "https://chatgpt.com/";

    fn manager(storage: Arc<InMemoryStorage>) -> MappingManager {
        MappingManager::new(
            storage,
            ContextPolicy::new(
                ContextKey::new(GENERIC).unwrap(),
                vec!["https://chatgpt.com/c/".to_string()],
            ),
        )
    }

    fn entry(replacement: &str, original: &str) -> MappingEntry {
        let mut mapping = IndexMap::new();
        mapping.insert(replacement.to_string(), original.to_string());
        MappingEntry::new(SubstitutionMethod::Redact, mapping, json!({}))
    }

    #[tokio::test]
    async fn test_append_persists_and_reverses() {
        let storage = Arc::new(InMemoryStorage::new());
        let manager = manager(storage.clone());
        let key = ContextKey::new("https://chatgpt.com/c/1").unwrap();

        let report = manager.append(&key, entry("[REDACTED_PERSON]", "John")).await;
        assert!(report.persisted);
        assert_eq!(report.outcome.entries, 1);
        assert_eq!(storage.load().await.unwrap().len(), 1);

        let reversal = manager
            .reverse("Hi [REDACTED_PERSON]", Some("https://chatgpt.com/c/1"))
            .await
            .unwrap();
        assert_eq!(reversal.text, "Hi John");
    }

    #[tokio::test]
    async fn test_save_reports_success_and_failure() {
        let storage = Arc::new(InMemoryStorage::new());
        let manager = manager(storage.clone());
        let policy = manager.policy().clone();

        let mut store = MappingStore::new();
        store.append(&ContextKey::new(GENERIC).unwrap(), entry("[A]", "a"), &policy);
        assert!(manager.save(&store).await);
        assert_eq!(manager.load().await, store);

        storage.set_fail_saves(true);
        let mut changed = store.clone();
        changed.append(&ContextKey::new(GENERIC).unwrap(), entry("[B]", "b"), &policy);
        assert!(!manager.save(&changed).await);
        assert_eq!(manager.load().await, store);
    }

    #[tokio::test]
    async fn test_failed_save_is_reported_not_raised() {
        let storage = Arc::new(InMemoryStorage::new());
        storage.set_fail_saves(true);
        let manager = manager(storage);

        let report = manager
            .append(&ContextKey::new(GENERIC).unwrap(), entry("[A]", "a"))
            .await;
        assert!(!report.persisted);
        assert!(manager.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_not_lost() {
        let storage = Arc::new(InMemoryStorage::new());
        let manager = Arc::new(manager(storage));
        let key = ContextKey::new("https://chatgpt.com/c/shared").unwrap();

        let mut handles = Vec::new();
        for i in 0..16 {
            let manager = manager.clone();
            let key = key.clone();
            handles.push(tokio::spawn(async move {
                manager
                    .append(&key, entry(&format!("[X_{i}]"), &format!("x{i}")))
                    .await
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().persisted);
        }

        let store = manager.snapshot().await;
        assert_eq!(store.context(key.as_str()).unwrap().len(), 16);
    }

    #[tokio::test]
    async fn test_reverse_on_empty_store_is_not_found() {
        let manager = manager(Arc::new(InMemoryStorage::new()));
        let err = manager.reverse("text", None).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
