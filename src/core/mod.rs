//! Core business logic for chatmask.
//!
//! # Modules
//!
//! - [`mappings`] - Mapping store, promotion, persistence policy and reversal
//!
//! # Reversal Workflow
//!
//! 1. **Resolve**: pick the context (exact key, generic key, last created key)
//! 2. **Replay**: walk the context's entries newest first
//! 3. **Restore**: substitute each replacement with its original value
//!
//! # Example
//!
//! ```rust
//! use chatmask::adapters::storage::InMemoryStorage;
//! use chatmask::core::mappings::{ContextPolicy, MappingManager};
//! use chatmask::domain::ContextKey;
//! use std::sync::Arc;
//!
//! # async fn example() -> chatmask::domain::Result<()> {
//! let policy = ContextPolicy::new(ContextKey::new("https://chatgpt.com/")?, Vec::new());
//! let manager = MappingManager::new(Arc::new(InMemoryStorage::new()), policy);
//!
//! let store = manager.snapshot().await;
//! println!("{} contexts", store.len());
//! # Ok(())
//! # }
//! ```

pub mod mappings;
