//! Mapping store document and context promotion
//!
//! The store maps a context key to the ordered history of mapping entries
//! recorded under it. Key insertion order is part of the data: reversal falls
//! back to the most recently *created* key, so the order must survive every
//! load/save cycle.

use crate::anonymization::models::MappingEntry;
use crate::domain::ContextKey;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Decides which context keys are generic and which are concrete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextPolicy {
    generic: ContextKey,
    concrete_prefixes: Vec<String>,
}

impl ContextPolicy {
    /// Create a policy
    ///
    /// With no prefixes, every key other than the generic one is concrete.
    pub fn new(generic: ContextKey, concrete_prefixes: Vec<String>) -> Self {
        Self {
            generic,
            concrete_prefixes,
        }
    }

    /// The reserved generic key
    pub fn generic(&self) -> &ContextKey {
        &self.generic
    }

    /// Whether `key` identifies a concrete conversation
    pub fn is_concrete(&self, key: &ContextKey) -> bool {
        if key == &self.generic {
            return false;
        }
        self.concrete_prefixes.is_empty()
            || self
                .concrete_prefixes
                .iter()
                .any(|prefix| key.as_str().starts_with(prefix.as_str()))
    }
}

/// What happened to the store during an append
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendOutcome {
    /// Key the entry was recorded under
    pub context: String,
    /// Generic key whose history was relocated, if promotion fired
    pub promoted_from: Option<String>,
    /// Entries under `context` after the append
    pub entries: usize,
}

/// Context key -> ordered mapping history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingStore {
    contexts: IndexMap<String, Vec<MappingEntry>>,
}

impl MappingStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of contexts
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// True when no context exists
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Whether a context exists for `key`
    pub fn contains(&self, key: &str) -> bool {
        self.contexts.contains_key(key)
    }

    /// History for a context, oldest first
    pub fn context(&self, key: &str) -> Option<&[MappingEntry]> {
        self.contexts.get(key).map(Vec::as_slice)
    }

    /// Context keys in creation order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.contexts.keys().map(String::as_str)
    }

    /// Most recently created key
    pub fn last_key(&self) -> Option<&str> {
        self.contexts.last().map(|(key, _)| key.as_str())
    }

    /// Iterate contexts in creation order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MappingEntry])> {
        self.contexts
            .iter()
            .map(|(key, entries)| (key.as_str(), entries.as_slice()))
    }

    /// Total number of entries across all contexts
    pub fn total_entries(&self) -> usize {
        self.contexts.values().map(Vec::len).sum()
    }

    /// Record `entry` under `key`, promoting the generic history if due
    ///
    /// 1. An existing context for `key` gets the entry appended.
    /// 2. Otherwise, when the generic context holds entries and `key` is
    ///    concrete, the generic history moves to `key` (the generic key is
    ///    removed) and the entry is appended after it.
    /// 3. Otherwise a new context is created for `key`.
    pub fn append(
        &mut self,
        key: &ContextKey,
        entry: MappingEntry,
        policy: &ContextPolicy,
    ) -> AppendOutcome {
        if let Some(entries) = self.contexts.get_mut(key.as_str()) {
            entries.push(entry);
            return AppendOutcome {
                context: key.to_string(),
                promoted_from: None,
                entries: entries.len(),
            };
        }

        let generic = policy.generic().as_str();
        let generic_has_history = self
            .contexts
            .get(generic)
            .is_some_and(|entries| !entries.is_empty());

        if generic_has_history && policy.is_concrete(key) {
            let mut history = self.contexts.shift_remove(generic).unwrap_or_default();
            debug_assert!(
                !self.contexts.contains_key(key.as_str()),
                "promotion target must not exist yet"
            );
            tracing::info!(
                from = %generic,
                to = %key,
                entries = history.len(),
                "Promoting generic context to concrete context"
            );
            history.push(entry);
            let entries = history.len();
            self.contexts.insert(key.to_string(), history);
            return AppendOutcome {
                context: key.to_string(),
                promoted_from: Some(generic.to_string()),
                entries,
            };
        }

        self.contexts.insert(key.to_string(), vec![entry]);
        AppendOutcome {
            context: key.to_string(),
            promoted_from: None,
            entries: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::models::SubstitutionMethod;
    use serde_json::json;

    const GENERIC: &str = "https://chatgpt.com/";
    const CHAT_A: &str = "https://chatgpt.com/c/aaa";
    const CHAT_B: &str = "https://chatgpt.com/c/bbb";

    fn policy() -> ContextPolicy {
        ContextPolicy::new(
            ContextKey::new(GENERIC).unwrap(),
            vec!["https://chatgpt.com/c/".to_string()],
        )
    }

    fn key(s: &str) -> ContextKey {
        ContextKey::new(s).unwrap()
    }

    fn entry(replacement: &str, original: &str) -> MappingEntry {
        let mut mapping = IndexMap::new();
        mapping.insert(replacement.to_string(), original.to_string());
        MappingEntry::new(SubstitutionMethod::Redact, mapping, json!({}))
    }

    #[test]
    fn test_policy_concreteness() {
        let policy = policy();
        assert!(!policy.is_concrete(&key(GENERIC)));
        assert!(policy.is_concrete(&key(CHAT_A)));
        assert!(!policy.is_concrete(&key("https://example.com/thread/1")));

        let open = ContextPolicy::new(key(GENERIC), Vec::new());
        assert!(open.is_concrete(&key("https://example.com/thread/1")));
        assert!(!open.is_concrete(&key(GENERIC)));
    }

    #[test]
    fn test_append_to_existing_context() {
        let mut store = MappingStore::new();
        store.append(&key(CHAT_A), entry("[A]", "a"), &policy());
        let outcome = store.append(&key(CHAT_A), entry("[B]", "b"), &policy());

        assert_eq!(outcome.entries, 2);
        assert!(outcome.promoted_from.is_none());
        let history = store.context(CHAT_A).unwrap();
        assert_eq!(history[0].mapping["[A]"], "a");
        assert_eq!(history[1].mapping["[B]"], "b");
    }

    #[test]
    fn test_generic_history_is_promoted_once() {
        let mut store = MappingStore::new();
        store.append(&key(GENERIC), entry("[A]", "a"), &policy());
        store.append(&key(GENERIC), entry("[B]", "b"), &policy());

        let outcome = store.append(&key(CHAT_A), entry("[C]", "c"), &policy());
        assert_eq!(outcome.promoted_from.as_deref(), Some(GENERIC));
        assert_eq!(outcome.entries, 3);
        assert!(!store.contains(GENERIC));

        let history = store.context(CHAT_A).unwrap();
        let originals: Vec<_> = history.iter().map(|e| e.mapping[0].as_str()).collect();
        assert_eq!(originals, vec!["a", "b", "c"]);

        // A second concrete key has nothing left to promote
        let outcome = store.append(&key(CHAT_B), entry("[D]", "d"), &policy());
        assert!(outcome.promoted_from.is_none());
        assert_eq!(store.context(CHAT_B).unwrap().len(), 1);
        assert_eq!(store.context(CHAT_A).unwrap().len(), 3);
    }

    #[test]
    fn test_existing_concrete_key_is_not_repromoted() {
        let mut store = MappingStore::new();
        store.append(&key(CHAT_A), entry("[A]", "a"), &policy());
        store.append(&key(GENERIC), entry("[B]", "b"), &policy());

        let outcome = store.append(&key(CHAT_A), entry("[C]", "c"), &policy());
        assert!(outcome.promoted_from.is_none());
        assert_eq!(store.context(CHAT_A).unwrap().len(), 2);
        assert_eq!(store.context(GENERIC).unwrap().len(), 1);
    }

    #[test]
    fn test_non_concrete_key_does_not_promote() {
        let mut store = MappingStore::new();
        store.append(&key(GENERIC), entry("[A]", "a"), &policy());
        let outcome = store.append(&key("https://example.com/x"), entry("[B]", "b"), &policy());

        assert!(outcome.promoted_from.is_none());
        assert!(store.contains(GENERIC));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_empty_generic_context_does_not_promote() {
        let mut store: MappingStore =
            serde_json::from_value(json!({ "https://chatgpt.com/": [] })).unwrap();
        let outcome = store.append(&key(CHAT_A), entry("[A]", "a"), &policy());

        assert!(outcome.promoted_from.is_none());
        assert!(store.contains(GENERIC));
    }

    #[test]
    fn test_key_order_survives_serialization() {
        let mut store = MappingStore::new();
        for k in ["https://z.example/", "https://a.example/", "https://m.example/"] {
            store.append(&key(k), entry("[X]", "x"), &policy());
        }

        let json = serde_json::to_string(&store).unwrap();
        let reloaded: MappingStore = serde_json::from_str(&json).unwrap();
        let keys: Vec<_> = reloaded.keys().collect();
        assert_eq!(
            keys,
            vec!["https://z.example/", "https://a.example/", "https://m.example/"]
        );
        assert_eq!(reloaded.last_key(), Some("https://m.example/"));
    }
}
