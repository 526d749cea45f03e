//! Runtime configuration
//!
//! Configuration comes from three layers, later ones winning:
//! - built-in defaults
//! - `PROMPT_MANAGER_*` environment variables (a `.env` file is loaded first)
//! - a JSON object passed by the host through [`Config::merge_value`]

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{PromptError, Result};

/// Version marker written next to the seeded prompts
pub const EXTENSION_VERSION: &str = env!("CARGO_PKG_VERSION");

const ENV_STORAGE_PATH: &str = "PROMPT_MANAGER_STORAGE_PATH";
const ENV_ACK_TIMEOUT_MS: &str = "PROMPT_MANAGER_ACK_TIMEOUT_MS";
const ENV_PIN_DELAY_MS: &str = "PROMPT_MANAGER_PIN_DELAY_MS";
const ENV_VERSION: &str = "PROMPT_MANAGER_VERSION";
const ENV_LOG_FILTER: &str = "PROMPT_MANAGER_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON file backing the key-value storage
    pub storage_path:      PathBuf,
    /// How long the popup waits for the content script to acknowledge
    pub ack_timeout_ms:    u64,
    /// Delay before the seeder's pin pass runs
    pub pin_delay_ms:      u64,
    pub extension_version: String,
    pub log_filter:        String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path:      default_storage_path(),
            ack_timeout_ms:    2_000,
            pin_delay_ms:      1_000,
            extension_version: EXTENSION_VERSION.to_string(),
            log_filter:        "info".to_string(),
        }
    }
}

impl Config {
    /// Build configuration from defaults and the environment
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let mut config = Self::default();

        if let Ok(path) = std::env::var(ENV_STORAGE_PATH) {
            config.storage_path = PathBuf::from(path);
        }
        if let Some(ms) = env_millis(ENV_ACK_TIMEOUT_MS)? {
            config.ack_timeout_ms = ms;
        }
        if let Some(ms) = env_millis(ENV_PIN_DELAY_MS)? {
            config.pin_delay_ms = ms;
        }
        if let Ok(version) = std::env::var(ENV_VERSION) {
            config.extension_version = version;
        }
        if let Ok(filter) = std::env::var(ENV_LOG_FILTER) {
            config.log_filter = filter;
        }

        Ok(config)
    }

    /// Overlay the fields present in a host-supplied JSON object
    pub fn merge_value(self, overrides: Value) -> Result<Self> {
        let overrides = match overrides {
            Value::Object(map) => map,
            Value::Null => return Ok(self),
            other => {
                return Err(PromptError::ConfigError(format!(
                    "expected an object, got {}",
                    other
                )))
            },
        };

        let mut merged = match serde_json::to_value(&self)? {
            Value::Object(map) => map,
            _ => return Err(PromptError::ConfigError("config is not an object".into())),
        };
        merged.extend(overrides);

        serde_json::from_value(Value::Object(merged))
            .map_err(|e| PromptError::ConfigError(e.to_string()))
    }

    pub fn ack_timeout(&self) -> Duration {
        Duration::from_millis(self.ack_timeout_ms)
    }

    pub fn pin_delay(&self) -> Duration {
        Duration::from_millis(self.pin_delay_ms)
    }
}

/// `<data dir>/prompt-manager/storage.json`, or the working directory if the
/// platform has no data dir
fn default_storage_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("prompt-manager")
        .join("storage.json")
}

fn env_millis(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| PromptError::ConfigError(format!("{}: {}", key, e))),
        Err(_) => Ok(None),
    }
}
