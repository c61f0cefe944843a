// Chatmask - Reversible anonymization for chat prompts
// Copyright (c) 2025 Chatmask Contributors
// Licensed under the MIT License

//! # Chatmask - reversible anonymization for chat prompts
//!
//! Chatmask sits between a user and a hosted chat model. It replaces
//! sensitive values in outgoing prompts with redaction labels or realistic
//! surrogates, remembers what it replaced per conversation, and restores the
//! originals in the model's replies.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Detecting** sensitive spans with a configurable regex pattern library
//! - **Planning** one consistent replacement per distinct value
//! - **Recording** the inverse mapping per conversation context, with
//!   promotion of anonymous history into the first concrete conversation
//! - **Reversing** replacements using the full history of a context
//!
//! ## Architecture
//!
//! Chatmask follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`server`] - HTTP transport (axum)
//! - [`anonymization`] - Detection, planning, rewriting and the engine
//! - [`core`] - Mapping store, promotion and reversal
//! - [`adapters`] - Mapping store persistence backends
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatmask::anonymization::{AnonymizationEngine, AnonymizeRequest};
//! use chatmask::config::load_config_or_default;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config_or_default(None)?;
//!     let engine = AnonymizationEngine::from_config(&config)?;
//!
//!     let masked = engine
//!         .anonymize(AnonymizeRequest::new("Call John at 555-1234"))
//!         .await?;
//!     println!("{}", masked.anonymized_text);
//!
//!     let restored = engine.deanonymize(&masked.anonymized_text, None).await?;
//!     println!("{}", restored.deanonymized_text);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library code returns [`domain::Result`], backed by [`domain::MaskError`].
//! The transport maps input errors to 400 and unknown contexts to 404.

pub mod adapters;
pub mod anonymization;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod server;
