//! Error context extension trait
//!
//! Similar to `anyhow::Context`, but for `Result<T, MaskError>`. Unlike
//! anyhow, the added context keeps the error's variant, so a wrapped
//! `NotFound` is still reported as not-found by the transport.
//!
//! # Examples
//!
//! ```rust
//! use chatmask::domain::Result;
//! use chatmask::domain::context::ResultExt;
//!
//! fn read_store(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_context(|| format!("Failed to read mapping store {path}"))
//! }
//! ```

use crate::domain::errors::MaskError;
use crate::domain::result::Result;

/// Adds `.context()` and `.with_context()` to results convertible to [`MaskError`]
pub trait ResultExt<T> {
    /// Add eagerly evaluated context to an error
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static;

    /// Add lazily evaluated context to an error
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<MaskError>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| e.into().prefixed(context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| e.into().prefixed(f()))
    }
}

impl MaskError {
    /// Same variant, message prefixed with `context`
    pub(crate) fn prefixed(self, context: impl std::fmt::Display) -> Self {
        let wrap = |msg: String| format!("{context}: {msg}");
        match self {
            Self::InvalidInput(m) => Self::InvalidInput(wrap(m)),
            Self::NotFound(m) => Self::NotFound(wrap(m)),
            Self::Configuration(m) => Self::Configuration(wrap(m)),
            Self::Persistence(m) => Self::Persistence(wrap(m)),
            Self::Serialization(m) => Self::Serialization(wrap(m)),
            Self::Io(m) => Self::Io(wrap(m)),
            Self::Detection(m) => Self::Detection(wrap(m)),
            Self::InvariantViolation(m) => Self::InvariantViolation(wrap(m)),
            Self::Other(m) => Self::Other(wrap(m)),
        }
    }
}
