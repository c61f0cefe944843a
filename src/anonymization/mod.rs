//! Anonymization module for chatmask
//!
//! This module turns free text into anonymized text plus a reversible
//! mapping, and back.
//!
//! # Architecture
//!
//! The anonymization pipeline consists of:
//! - **Detection**: regex-based span detection driven by a TOML pattern library
//! - **Planning**: one replacement per distinct original value (redaction or surrogate)
//! - **Rewriting**: single-pass splicing of the planned replacements
//! - **Audit**: JSON-lines logging with hashed values
//!
//! # Usage
//!
//! ```rust,no_run
//! use chatmask::anonymization::{AnonymizationEngine, AnonymizeRequest};
//! use chatmask::config::ChatmaskConfig;
//!
//! # async fn example() -> chatmask::domain::Result<()> {
//! let engine = AnonymizationEngine::from_config(&ChatmaskConfig::default())?;
//! let anonymized = engine
//!     .anonymize(AnonymizeRequest::new("Mail jane@example.com").with_context("https://chatgpt.com/c/1"))
//!     .await?;
//! let restored = engine
//!     .deanonymize(&anonymized.anonymized_text, Some("https://chatgpt.com/c/1"))
//!     .await?;
//! assert_eq!(restored.deanonymized_text, "Mail jane@example.com");
//! # Ok(())
//! # }
//! ```

pub mod anonymizer;
pub mod audit;
pub mod config;
pub mod detector;
pub mod engine;
pub mod models;
pub mod planner;
pub mod rewriter;

// Re-export main types
pub use config::{AnonymizationConfig, ClientConfig};
pub use engine::{AnonymizationEngine, AnonymizeRequest, AnonymizeResponse, DeanonymizeResponse};
pub use models::{EntityType, MappingEntry, Span, SubstitutionMethod};
