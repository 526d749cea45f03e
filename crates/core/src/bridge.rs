//! Host bridge for the popup shell
//!
//! The shell (the page that draws the popup) talks to the core through
//! named commands with JSON arguments. This module provides that boundary:
//! - Wiring config, storage, messaging and clipboard into a popup
//! - Command dispatch
//! - Error conversion to structured error objects

use std::sync::Arc;

use serde_json::{json, Value};

use crate::{
    commands,
    config::Config,
    db::{FileStorage, KeyValueStorage, PromptStore},
    errors::{PromptError, Result},
    inserter::{Clipboard, SystemClipboard},
    logging,
    messaging::{TabHub, TabMessenger},
    popup::PopupController,
    runtime,
};

pub struct Bridge {
    popup: PopupController,
}

impl Bridge {
    pub fn new(popup: PopupController) -> Self {
        Self { popup }
    }

    /// Build a popup from environment config overlaid with `overrides`
    ///
    /// Returns the hub as well so content scripts can be attached to it.
    pub fn setup(overrides: Value) -> Result<(Self, TabHub)> {
        let config = Config::from_env()?.merge_value(overrides)?;
        logging::init(&config.log_filter);

        let storage: Arc<dyn KeyValueStorage> =
            Arc::new(runtime::block_on(FileStorage::open(&config.storage_path))?);
        let hub = TabHub::new(config.ack_timeout());
        let messenger: Arc<dyn TabMessenger> = Arc::new(hub.clone());
        let clipboard: Arc<dyn Clipboard> = Arc::new(SystemClipboard);

        let popup = runtime::block_on(PopupController::open(
            PromptStore::new(storage),
            messenger,
            clipboard,
        ));
        tracing::info!(storage = %config.storage_path.display(), "bridge ready");

        Ok((Self::new(popup), hub))
    }

    pub fn popup(&self) -> &PopupController {
        &self.popup
    }

    /// Main entry point for command execution
    ///
    /// # Arguments
    /// * `command` - Command name in format "category.action" (e.g., "prompts.list")
    /// * `args` - Command arguments as JSON object
    ///
    /// # Returns
    /// Command result, or an error object; never fails
    pub fn call(&mut self, command: &str, args: Value) -> Value {
        match commands::dispatch(&mut self.popup, command, args) {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(command, category = err.category(), error = %err, "command failed");
                create_error_object(&err)
            },
        }
    }
}

/// Create a structured error object for the shell
///
/// Fields:
/// - `error`: true (marker that this is an error response)
/// - `message`: user-friendly error message
/// - `category`: error category for logging/handling
fn create_error_object(err: &PromptError) -> Value {
    json!({
        "error": true,
        "message": err.user_message(),
        "category": err.category(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryStorage, Prompt};
    use crate::inserter::MemoryClipboard;
    use std::time::Duration;

    fn bridge() -> Bridge {
        let storage = Arc::new(MemoryStorage::new());
        let store = PromptStore::new(storage);
        runtime::block_on(store.save(&[Prompt::new("1", "Linux Terminal", "terminal")]));

        let popup = runtime::block_on(PopupController::open(
            store,
            Arc::new(TabHub::new(Duration::from_millis(10))),
            Arc::new(MemoryClipboard::new()),
        ));
        Bridge::new(popup)
    }

    #[test]
    fn test_call_unknown_command_returns_error_object() {
        let result = bridge().call("unknown.command", json!({}));

        assert_eq!(result["error"], json!(true));
        assert!(result["message"].as_str().unwrap().contains("unknown.command"));
        assert_eq!(result["category"], json!("command"));
    }

    #[test]
    fn test_call_missing_argument() {
        let result = bridge().call("prompts.toggle_pin", json!({}));

        assert_eq!(result["error"], json!(true));
        assert_eq!(result["category"], json!("arguments"));
    }

    #[test]
    fn test_call_list() {
        let result = bridge().call("prompts.list", json!(null));

        assert_eq!(result["cards"][0]["title"], json!("Linux Terminal"));
        assert_eq!(result["filter"], json!("all"));
    }

    #[test]
    fn test_create_error_object() {
        let obj = create_error_object(&PromptError::PromptNotFound("7".into()));
        assert_eq!(obj["category"], json!("not_found"));
        assert!(obj["message"].as_str().unwrap().contains('7'));
    }
}
