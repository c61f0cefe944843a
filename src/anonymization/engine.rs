//! Main anonymization engine
//!
//! This module provides the [`AnonymizationEngine`] that ties detection,
//! replacement planning, rewriting, mapping persistence and audit logging
//! into the anonymize and deanonymize operations.
//!
//! # Architecture
//!
//! - **Detector**: locates sensitive spans in the text
//! - **Planner**: assigns one replacement per distinct original value
//! - **Rewriter**: splices the replacements into the text
//! - **Mapping manager**: records the inverse mapping under the context key
//! - **Audit Logger**: records each call with hashed values
//!
//! # Examples
//!
//! ```no_run
//! use chatmask::anonymization::engine::{AnonymizationEngine, AnonymizeRequest};
//! use chatmask::config::ChatmaskConfig;
//!
//! # async fn example() -> chatmask::domain::Result<()> {
//! let engine = AnonymizationEngine::from_config(&ChatmaskConfig::default())?;
//!
//! let response = engine
//!     .anonymize(AnonymizeRequest::new("Call John at 555-1234"))
//!     .await?;
//! println!("{}", response.anonymized_text);
//! # Ok(())
//! # }
//! ```

use crate::adapters::storage::create_mapping_storage;
use crate::anonymization::{
    anonymizer::{FakerSurrogateGenerator, SurrogateGenerator},
    audit::{AuditEvent, AuditLogger},
    config::{AnonymizationConfig, ClientConfig, ResolvedSelection},
    detector::{PatternRegistry, RegexDetector, SpanDetector},
    models::{EntityType, MappingEntry, SubstitutionMethod},
    planner::ReplacementPlanner,
    rewriter::rewrite,
};
use crate::config::ChatmaskConfig;
use crate::core::mappings::{MappingManager, MappingStore};
use crate::domain::{ContextKey, MaskError, Result};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// Input to [`AnonymizationEngine::anonymize`]
#[derive(Debug, Clone, Default)]
pub struct AnonymizeRequest {
    /// Text to anonymize
    pub text: String,
    /// Context key; absent or blank means the generic context
    pub context: Option<String>,
    /// Method override
    pub method: Option<SubstitutionMethod>,
    /// Entity type restriction
    pub entities: Option<Vec<EntityType>>,
    /// Raw client configuration, validated and snapshotted into the entry
    pub config: Option<Value>,
}

impl AnonymizeRequest {
    /// Request with engine defaults for everything but the text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set the context key
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Set the substitution method
    pub fn with_method(mut self, method: SubstitutionMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Restrict detection to `entities`
    pub fn with_entities(mut self, entities: Vec<EntityType>) -> Self {
        self.entities = Some(entities);
        self
    }

    /// Attach a client configuration payload
    pub fn with_config(mut self, config: Value) -> Self {
        self.config = Some(config);
        self
    }
}

/// Output of [`AnonymizationEngine::anonymize`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnonymizeResponse {
    /// Text with every detected span replaced
    pub anonymized_text: String,
    /// Replacement -> original for this call
    pub mapping: IndexMap<String, String>,
    /// Method applied
    #[serde(rename = "anonymization_method")]
    pub method: SubstitutionMethod,
    /// Configuration snapshot stored with the entry
    pub config: Value,
    /// Context the entry was recorded under
    pub context: String,
    /// False when the mapping could not be saved; the call still succeeds
    pub persisted: bool,
}

/// Output of [`AnonymizationEngine::deanonymize`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeanonymizeResponse {
    /// Text with stored replacements restored
    pub deanonymized_text: String,
    /// Method of the oldest entry in the resolved context
    #[serde(rename = "anonymization_method")]
    pub method: SubstitutionMethod,
    /// Context actually used
    pub context: String,
}

/// Main anonymization engine
///
/// # Thread Safety
///
/// The engine is `Send + Sync` and meant to be shared behind an `Arc`.
/// Store mutations are serialized inside the [`MappingManager`].
pub struct AnonymizationEngine {
    config: AnonymizationConfig,
    detector: Arc<dyn SpanDetector>,
    generator: Arc<dyn SurrogateGenerator>,
    mappings: MappingManager,
    audit_logger: Option<AuditLogger>,
}

impl AnonymizationEngine {
    /// Create an engine with the built-in detector and surrogate generator
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the pattern library
    /// cannot be loaded or the audit log cannot be opened.
    pub fn new(config: AnonymizationConfig, mappings: MappingManager) -> Result<Self> {
        config.validate().map_err(|e| {
            MaskError::Configuration(format!("Invalid anonymization configuration: {e}"))
        })?;

        let registry = match config.pattern_library {
            Some(ref path) => PatternRegistry::from_file(path)?,
            None => PatternRegistry::default_patterns()?,
        };
        let detector = RegexDetector::with_registry(registry)
            .with_confidence_threshold(config.min_confidence);
        let audit_logger = AuditLogger::from_config(&config.audit)?;

        Ok(Self::with_components(
            config,
            Arc::new(detector),
            Arc::new(FakerSurrogateGenerator::new()),
            mappings,
            audit_logger,
        ))
    }

    /// Create an engine from the full application configuration
    pub fn from_config(config: &ChatmaskConfig) -> Result<Self> {
        let storage = create_mapping_storage(&config.store);
        let mappings = MappingManager::new(storage, config.store.context_policy()?);
        Self::new(config.anonymization.clone(), mappings)
    }

    /// Create an engine from explicit collaborators
    pub fn with_components(
        config: AnonymizationConfig,
        detector: Arc<dyn SpanDetector>,
        generator: Arc<dyn SurrogateGenerator>,
        mappings: MappingManager,
        audit_logger: Option<AuditLogger>,
    ) -> Self {
        tracing::info!(
            detector = detector.name(),
            store = %mappings.describe(),
            default_method = %config.method,
            audit = audit_logger.is_some(),
            "Anonymization engine ready"
        );

        Self {
            config,
            detector,
            generator,
            mappings,
            audit_logger,
        }
    }

    /// Anonymization defaults in effect
    pub fn config(&self) -> &AnonymizationConfig {
        &self.config
    }

    /// Mapping manager backing this engine
    pub fn mappings(&self) -> &MappingManager {
        &self.mappings
    }

    /// Validate a client configuration payload and resolve it
    pub fn resolve_client_config(&self, value: &Value) -> Result<(ClientConfig, ResolvedSelection)> {
        let client = ClientConfig::from_value(value)?;
        let resolved = client.resolve();
        Ok((client, resolved))
    }

    /// Anonymize `request.text` and record the mapping under its context
    ///
    /// A failure to persist the mapping does not fail the call; the response
    /// reports it through `persisted`.
    pub async fn anonymize(&self, request: AnonymizeRequest) -> Result<AnonymizeResponse> {
        let started = Instant::now();
        let context = ContextKey::or_default(
            request.context.as_deref(),
            self.mappings.policy().generic(),
        );

        let client_config = request.config.filter(|v| !is_absent_config(v));
        let selection = match client_config {
            Some(ref value) => Some(self.resolve_client_config(value)?.1),
            None => None,
        };

        let method = request
            .method
            .or(selection.as_ref().map(|s| s.method))
            .unwrap_or(self.config.method);
        // An empty selection means "everything", never "nothing"
        let entities = request
            .entities
            .filter(|e| !e.is_empty())
            .or_else(|| selection.as_ref().map(|s| s.entities.clone()))
            .unwrap_or_else(|| self.config.default_entities());

        let spans = self.detector.detect(&request.text, &entities)?;
        let plan = ReplacementPlanner::new(method, self.generator.as_ref())
            .plan(&request.text, &spans)?;
        let anonymized_text = rewrite(&request.text, &plan.value_map, &spans)?;

        let snapshot = client_config.unwrap_or_else(|| Value::Object(Default::default()));
        let entry = MappingEntry::new(method, plan.reverse_map.clone(), snapshot.clone());
        let report = self.mappings.append(&context, entry).await;

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        if let Some(ref logger) = self.audit_logger {
            let event = AuditEvent {
                context: &report.outcome.context,
                method,
                plan: &plan,
                spans: spans.len(),
                processing_time_ms: elapsed_ms,
                persisted: report.persisted,
            };
            if let Err(e) = logger.log_anonymization(&event) {
                crate::log_error_with_context!(e, "Failed to write audit entry");
            }
        }

        crate::log_anonymize_complete!(
            report.outcome.context,
            method,
            spans.len(),
            started.elapsed()
        );
        if !report.persisted {
            tracing::warn!(context = %report.outcome.context, "Mapping entry was not persisted");
        }

        Ok(AnonymizeResponse {
            anonymized_text,
            mapping: plan.reverse_map,
            method,
            config: snapshot,
            context: report.outcome.context,
            persisted: report.persisted,
        })
    }

    /// Restore original values in `text` from the history of `context`
    pub async fn deanonymize(&self, text: &str, context: Option<&str>) -> Result<DeanonymizeResponse> {
        let reversal = self.mappings.reverse(text, context).await?;

        tracing::debug!(requested = context.unwrap_or_default(), "Resolved reversal context");
        crate::log_deanonymize_complete!(reversal.context, reversal.entries_applied);

        Ok(DeanonymizeResponse {
            deanonymized_text: reversal.text,
            method: reversal.method,
            context: reversal.context,
        })
    }

    /// Full mapping store
    pub async fn list_mappings(&self) -> MappingStore {
        self.mappings.snapshot().await
    }
}

/// `null` and `{}` both mean no client configuration was sent
fn is_absent_config(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}
