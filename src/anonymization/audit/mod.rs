//! Audit logging module
//!
//! Provides a JSON-lines audit trail for anonymize calls.

pub mod logger;

pub use logger::{AuditEvent, AuditLogger};
