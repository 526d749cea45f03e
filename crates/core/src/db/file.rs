//! JSON-file storage area
//!
//! The record is kept as one pretty-printed JSON object. Writes go to a
//! sibling temp file which is then renamed over the original, so readers see
//! either the old record or the new one.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use super::KeyValueStorage;
use crate::errors::{PromptError, Result};

#[derive(Debug)]
pub struct FileStorage {
    path:  PathBuf,
    /// Serialises read-modify-write cycles from this process
    write: Mutex<()>,
}

impl FileStorage {
    /// Open storage at `path`, creating the parent directory if needed
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    PromptError::StorageError(format!(
                        "Failed to create storage directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(Self {
            path,
            write: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_record(&self) -> Result<Map<String, Value>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&raw)? {
            Value::Object(map) => Ok(map),
            _ => Err(PromptError::StorageError(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }

    async fn write_record(&self, record: &Map<String, Value>) -> Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(record)?;

        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
        let mut record = self.read_record().await?;
        Ok(keys
            .iter()
            .filter_map(|key| record.remove(*key).map(|v| (key.to_string(), v)))
            .collect())
    }

    async fn set(&self, items: Map<String, Value>) -> Result<()> {
        let _guard = self.write.lock().await;

        let mut record = self.read_record().await?;
        record.extend(items);
        self.write_record(&record).await?;

        tracing::debug!(path = %self.path.display(), "storage record written");
        Ok(())
    }
}
