//! Context identifiers
//!
//! A context key scopes a history of mapping entries. It is usually the URL
//! of a conversation, but the store treats it as an opaque string.

use super::errors::MaskError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Context key newtype wrapper
///
/// # Examples
///
/// ```
/// use chatmask::domain::ids::ContextKey;
/// use std::str::FromStr;
///
/// let key = ContextKey::from_str("https://chatgpt.com/c/abc-123").unwrap();
/// assert_eq!(key.as_str(), "https://chatgpt.com/c/abc-123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContextKey(String);

impl ContextKey {
    /// Creates a new ContextKey, rejecting blank strings
    pub fn new(key: impl Into<String>) -> Result<Self, MaskError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(MaskError::InvalidInput(
                "Context key cannot be empty".to_string(),
            ));
        }
        Ok(Self(key))
    }

    /// Resolves an optional, possibly blank key, falling back to `default`
    pub fn or_default(key: Option<&str>, default: &ContextKey) -> ContextKey {
        match key {
            Some(k) if !k.trim().is_empty() => Self(k.to_string()),
            _ => default.clone(),
        }
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContextKey {
    type Err = MaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ContextKey {
    type Error = MaskError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContextKey> for String {
    fn from(key: ContextKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ContextKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
