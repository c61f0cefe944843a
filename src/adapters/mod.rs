//! External system integrations for chatmask.
//!
//! - [`storage`] - Mapping store persistence (trait-based, JSON file and in-memory)
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with in-memory implementations. The storage layer uses a
//! trait-based abstraction so the mapping manager never touches the filesystem
//! directly.
//!
//! ```rust,no_run
//! use chatmask::adapters::storage::{JsonFileStorage, MappingStorage};
//!
//! # async fn example() -> chatmask::domain::Result<()> {
//! let storage = JsonFileStorage::new("mappings/chatgpt.json");
//! let store = storage.load().await?;
//! storage.save(&store).await?;
//! # Ok(())
//! # }
//! ```

pub mod storage;
