//! Domain error types
//!
//! This module defines the error hierarchy for chatmask. Errors fall into
//! four families that callers need to tell apart:
//!
//! - **Client input** ([`MaskError::InvalidInput`]): the request itself is wrong,
//!   nothing was attempted and nothing was persisted.
//! - **Lookup miss** ([`MaskError::NotFound`]): no mappings exist for the
//!   resolved context.
//! - **Persistence** ([`MaskError::Persistence`], [`MaskError::Io`],
//!   [`MaskError::Serialization`]): reading or writing the mapping store failed.
//! - **Invariant violation** ([`MaskError::InvariantViolation`]): detector output
//!   broke a precondition such as non-overlapping spans.

use thiserror::Error;

/// Main chatmask error type
#[derive(Debug, Error)]
pub enum MaskError {
    /// Missing or malformed request input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No mappings available for the requested context
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Mapping store persistence errors
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Detector failures
    #[error("Detection error: {0}")]
    Detection(String),

    /// Broken preconditions on spans or store state
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl MaskError {
    /// Whether the error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Whether the error is a lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Message without the variant prefix, as shown to API clients
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput(m)
            | Self::NotFound(m)
            | Self::Configuration(m)
            | Self::Persistence(m)
            | Self::Serialization(m)
            | Self::Io(m)
            | Self::Detection(m)
            | Self::InvariantViolation(m)
            | Self::Other(m) => m,
        }
    }
}

impl From<std::io::Error> for MaskError {
    fn from(err: std::io::Error) -> Self {
        MaskError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MaskError {
    fn from(err: serde_json::Error) -> Self {
        MaskError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for MaskError {
    fn from(err: toml::de::Error) -> Self {
        MaskError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_error_display() {
        let err = MaskError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_error_classification() {
        assert!(MaskError::InvalidInput("no text".into()).is_client_error());
        assert!(!MaskError::InvalidInput("no text".into()).is_not_found());
        assert!(MaskError::NotFound("no mappings".into()).is_not_found());
        assert!(!MaskError::Persistence("disk full".into()).is_client_error());
    }

    #[test]
    fn test_message_drops_prefix() {
        let err = MaskError::InvalidInput("No text provided".into());
        assert_eq!(err.message(), "No text provided");
        assert_eq!(err.to_string(), "Invalid input: No text provided");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: MaskError = io_err.into();
        assert!(matches!(err, MaskError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: MaskError = json_err.into();
        assert!(matches!(err, MaskError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: MaskError = toml_err.into();
        assert!(matches!(err, MaskError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_mask_error_implements_std_error() {
        let err = MaskError::InvariantViolation("overlap".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
