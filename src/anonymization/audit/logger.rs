//! Audit logger for anonymization operations

use crate::anonymization::config::AuditConfig;
use crate::anonymization::models::SubstitutionMethod;
use crate::anonymization::planner::ReplacementPlan;
use crate::domain::context::ResultExt;
use crate::domain::Result;
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// One anonymize call, as seen by the audit trail
#[derive(Debug)]
pub struct AuditEvent<'a> {
    /// Context the entry was recorded under
    pub context: &'a str,
    /// Method applied
    pub method: SubstitutionMethod,
    /// Resolved replacements for the call
    pub plan: &'a ReplacementPlan,
    /// Number of spans rewritten, repeats included
    pub spans: usize,
    /// Wall-clock processing time
    pub processing_time_ms: u64,
    /// Whether the mapping entry reached storage
    pub persisted: bool,
}

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry<'a> {
    timestamp: String,
    context: &'a str,
    method: SubstitutionMethod,
    spans: usize,
    distinct_values: usize,
    processing_time_ms: u64,
    persisted: bool,
    detections: Vec<AuditDetection>,
}

/// Audit detection entry (with hashed value)
#[derive(Debug, Serialize)]
struct AuditDetection {
    entity_type: String,
    /// SHA-256 hash of original value (never log plaintext)
    value_hash: String,
}

/// Audit logger for anonymization operations
///
/// Writes one JSON object per line. Original values only ever appear as
/// SHA-256 hashes.
pub struct AuditLogger {
    log_path: PathBuf,
    write_lock: Mutex<()>,
}

impl AuditLogger {
    /// Create a new audit logger, or `None` when auditing is disabled
    pub fn from_config(config: &AuditConfig) -> Result<Option<Self>> {
        if !config.enabled {
            return Ok(None);
        }
        Self::new(config.log_path.clone()).map(Some)
    }

    /// Create a new audit logger writing to `log_path`
    pub fn new(log_path: PathBuf) -> Result<Self> {
        if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create audit log directory: {}", parent.display())
            })?;
        }

        Ok(Self {
            log_path,
            write_lock: Mutex::new(()),
        })
    }

    /// Log an anonymize call
    pub fn log_anonymization(&self, event: &AuditEvent<'_>) -> Result<()> {
        let entry = AuditLogEntry {
            timestamp: Utc::now().to_rfc3339(),
            context: event.context,
            method: event.method,
            spans: event.spans,
            distinct_values: event.plan.len(),
            processing_time_ms: event.processing_time_ms,
            persisted: event.persisted,
            detections: event
                .plan
                .entity_types
                .iter()
                .map(|(original, entity_type)| AuditDetection {
                    entity_type: entity_type.label().to_string(),
                    value_hash: hash_value(original),
                })
                .collect(),
        };

        self.write_entry(&entry)
    }

    /// Write an audit entry to the log file
    fn write_entry(&self, entry: &AuditLogEntry<'_>) -> Result<()> {
        let json_line = serde_json::to_string(entry)?;

        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;

        writeln!(file, "{json_line}").context("Failed to write audit entry")?;
        Ok(())
    }
}

/// Hash a value using SHA-256
fn hash_value(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    format!("{result:x}")
}
