//! JSON file mapping storage
//!
//! Persists the store as a single pretty-printed JSON object, keyed by
//! context. Writes go to a sibling `.tmp` file that is renamed over the
//! target, so readers never observe a half-written document.

use super::traits::MappingStorage;
use crate::core::mappings::store::MappingStore;
use crate::domain::context::ResultExt;
use crate::domain::{MaskError, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Mapping storage backed by a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create a storage for `path`; nothing is touched until first use
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "mappings.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl MappingStorage for JsonFileStorage {
    async fn load(&self) -> Result<MappingStore> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Mapping store file does not exist yet");
                return Ok(MappingStore::new());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read mapping store {}", self.path.display())
                })
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(MappingStore::new());
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            MaskError::Serialization(format!(
                "Mapping store {} is not valid JSON: {e}",
                self.path.display()
            ))
        })
    }

    async fn save(&self, store: &MappingStore) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create mapping directory {}", parent.display())
            })?;
        }

        let bytes = serde_json::to_vec_pretty(store)?;
        let tmp = self.tmp_path();

        tokio::fs::write(&tmp, bytes)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        tracing::debug!(
            path = %self.path.display(),
            contexts = store.len(),
            "Mapping store saved"
        );
        Ok(())
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}
