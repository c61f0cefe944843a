//! Anonymize command implementation

use super::{load_or_report, text_or_stdin, EXIT_CONFIG_ERROR};
use crate::anonymization::{AnonymizationEngine, AnonymizeRequest, EntityType, SubstitutionMethod};
use clap::Args;
use std::path::Path;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// Text to anonymize; reads stdin when omitted or "-"
    pub text: Option<String>,

    /// Context key (conversation URL)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Substitution method (redact or fake)
    #[arg(short, long)]
    pub method: Option<String>,

    /// Comma-separated entity types, e.g. PERSON,EMAIL_ADDRESS
    #[arg(short, long, value_delimiter = ',')]
    pub entities: Vec<String>,

    /// Print the full response as JSON
    #[arg(long)]
    pub json: bool,
}

/// Blank names are dropped; nothing left means no restriction
fn parse_entities(raw: &[String]) -> Option<Vec<EntityType>> {
    let entities: Vec<EntityType> = raw
        .iter()
        .map(|e| e.trim())
        .filter(|e| !e.is_empty())
        .map(EntityType::from)
        .collect();
    (!entities.is_empty()).then_some(entities)
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        let Some(config) = load_or_report(config_path) else {
            return Ok(EXIT_CONFIG_ERROR);
        };

        let mut request = AnonymizeRequest::new(text_or_stdin(self.text.as_deref()).await?);
        request.context = self.url.clone();
        if let Some(ref method) = self.method {
            request.method = Some(method.parse::<SubstitutionMethod>()?);
        }
        request.entities = parse_entities(&self.entities);

        let engine = AnonymizationEngine::from_config(&config)?;
        let response = engine.anonymize(request).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else {
            println!("{}", response.anonymized_text);
            if !response.persisted {
                eprintln!("⚠️  Mapping could not be saved; this text cannot be de-anonymized later");
            }
        }

        Ok(0)
    }
}
