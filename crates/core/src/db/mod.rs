use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::Result;

pub mod file;
pub mod memory;
pub mod prompts;
pub mod schema;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use prompts::{Prompt, PromptDraft, PromptStore};

/// Flat key-value persistence, shaped like the extension storage area
///
/// `get` returns only the requested keys that exist; `set` merges the given
/// items over the stored record in one step.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>>;

    async fn set(&self, items: Map<String, Value>) -> Result<()>;
}
