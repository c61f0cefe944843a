//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console output
//! - Configurable log levels
//! - JSON file logging with rotation
//!
//! Original values never go to the log. The macros below only record
//! counts, contexts and methods.
//!
//! # Example
//!
//! ```no_run
//! use chatmask::logging::init_logging;
//! use chatmask::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a completed anonymize call
///
/// # Example
///
/// ```no_run
/// use chatmask::log_anonymize_complete;
/// use std::time::Duration;
///
/// log_anonymize_complete!("https://chatgpt.com/c/abc", "redact", 3, Duration::from_millis(4));
/// ```
#[macro_export]
macro_rules! log_anonymize_complete {
    ($context:expr, $method:expr, $spans:expr, $duration:expr) => {
        tracing::info!(
            context = %$context,
            method = %$method,
            spans = $spans,
            duration_ms = $duration.as_millis() as u64,
            "Anonymization completed"
        );
    };
}

/// Log a completed deanonymize call
///
/// # Example
///
/// ```no_run
/// use chatmask::log_deanonymize_complete;
///
/// log_deanonymize_complete!("https://chatgpt.com/c/abc", 2);
/// ```
#[macro_export]
macro_rules! log_deanonymize_complete {
    ($context:expr, $entries:expr) => {
        tracing::info!(
            context = %$context,
            entries_applied = $entries,
            "De-anonymization completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use chatmask::log_error_with_context;
/// use chatmask::domain::MaskError;
///
/// let error = MaskError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
