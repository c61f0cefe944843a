//! Domain types for chatmask.
//!
//! The domain layer provides:
//! - **Error types** ([`MaskError`]) and the crate [`Result`] alias
//! - **Strongly-typed identifiers** ([`ContextKey`])
//! - **Error context** ([`context::ResultExt`])
//!
//! # Error Handling
//!
//! All fallible core operations return [`Result<T, MaskError>`]:
//!
//! ```rust
//! use chatmask::domain::{ContextKey, Result};
//!
//! fn example() -> Result<ContextKey> {
//!     let key = ContextKey::new("https://chatgpt.com/c/abc")?;
//!     Ok(key)
//! }
//! ```

pub mod context;
pub mod errors;
pub mod ids;
pub mod result;

pub use errors::MaskError;
pub use ids::ContextKey;
pub use result::Result;
