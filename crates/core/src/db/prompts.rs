use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{
    schema::{PROMPTS_KEY, VERSION_KEY},
    KeyValueStorage,
};
use crate::errors::{PromptError, Result};

/// Message shown when the add/edit form is incomplete
pub const INCOMPLETE_DRAFT: &str = "Please fill in both title and content";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id:        String,
    pub title:     String,
    pub content:   String,
    #[serde(default)]
    pub is_pinned: bool,
    /// Milliseconds since the epoch; only used for ordering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<i64>,
}

impl Prompt {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id:        id.into(),
            title:     title.into(),
            content:   content.into(),
            is_pinned: false,
            last_used: None,
        }
    }

    /// `lastUsed` with "never used" collapsed to zero
    pub fn last_used_or_zero(&self) -> i64 {
        self.last_used.unwrap_or(0)
    }

    pub fn touch(&mut self) {
        self.last_used = Some(now_millis());
    }
}

/// Raw title/content as typed into the add/edit form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptDraft {
    pub title:   String,
    pub content: String,
}

impl PromptDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title:   title.into(),
            content: content.into(),
        }
    }

    /// Trimmed `(title, content)`, or a validation error if either is blank
    pub fn validate(&self) -> Result<(String, String)> {
        let title = self.title.trim();
        let content = self.content.trim();

        if title.is_empty() || content.is_empty() {
            return Err(PromptError::ValidationError(INCOMPLETE_DRAFT.to_string()));
        }

        Ok((title.to_string(), content.to_string()))
    }
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Creation-timestamp id, bumped until it is unused in `existing`
pub fn next_id(existing: &[Prompt]) -> String {
    let mut stamp = now_millis();
    loop {
        let candidate = stamp.to_string();
        if existing.iter().all(|p| p.id != candidate) {
            return candidate;
        }
        stamp += 1;
    }
}

/// Load/save access to the persisted prompt collection
#[derive(Clone)]
pub struct PromptStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl PromptStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Persisted prompts; empty when nothing is stored or the read fails
    pub async fn load(&self) -> Vec<Prompt> {
        match self.try_load().await {
            Ok(prompts) => {
                tracing::debug!(count = prompts.len(), "prompts loaded");
                prompts
            },
            Err(e) => {
                tracing::warn!(error = %e, "failed to load prompts, treating as empty");
                Vec::new()
            },
        }
    }

    /// Replace the persisted collection; returns whether the write landed
    ///
    /// A failed write is only logged. The caller keeps its in-memory copy.
    pub async fn save(&self, prompts: &[Prompt]) -> bool {
        match self.try_save(prompts).await {
            Ok(()) => {
                tracing::debug!(count = prompts.len(), "prompts saved");
                true
            },
            Err(e) => {
                tracing::warn!(error = %e, "failed to save prompts");
                false
            },
        }
    }

    pub async fn try_load(&self) -> Result<Vec<Prompt>> {
        let mut items = self.storage.get(&[PROMPTS_KEY]).await?;
        match items.remove(PROMPTS_KEY) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    pub async fn try_save(&self, prompts: &[Prompt]) -> Result<()> {
        let mut items = Map::new();
        items.insert(PROMPTS_KEY.to_string(), serde_json::to_value(prompts)?);
        self.storage.set(items).await
    }

    /// Version marker of the build that last seeded the store
    pub async fn installed_version(&self) -> Result<Option<String>> {
        let mut items = self.storage.get(&[VERSION_KEY]).await?;
        Ok(items
            .remove(VERSION_KEY)
            .and_then(|v| v.as_str().map(String::from)))
    }

    /// Write prompts and version marker in a single storage call
    pub async fn install(&self, prompts: &[Prompt], version: &str) -> Result<()> {
        let mut items = Map::new();
        items.insert(PROMPTS_KEY.to_string(), serde_json::to_value(prompts)?);
        items.insert(VERSION_KEY.to_string(), Value::String(version.to_string()));
        self.storage.set(items).await
    }
}
