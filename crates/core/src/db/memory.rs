//! In-memory storage area, with switchable failure injection

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use super::KeyValueStorage;
use crate::errors::{PromptError, Result};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items:       Mutex<Map<String, Value>>,
    fail_reads:  AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given record already stored
    pub fn with_items(items: Map<String, Value>) -> Self {
        Self {
            items: Mutex::new(items),
            ..Self::default()
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Copy of the whole stored record
    pub async fn snapshot(&self) -> Map<String, Value> {
        self.items.lock().await.clone()
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(PromptError::StorageError("read failed".into()));
        }

        let items = self.items.lock().await;
        Ok(keys
            .iter()
            .filter_map(|key| items.get(*key).map(|v| (key.to_string(), v.clone())))
            .collect())
    }

    async fn set(&self, items: Map<String, Value>) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PromptError::StorageError("write failed".into()));
        }

        self.items.lock().await.extend(items);
        Ok(())
    }
}
