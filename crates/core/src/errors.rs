//! Error types for prompt-manager
//!
//! This module defines the error type shared by every surface (store, popup,
//! content script). Messages are kept user-friendly because the command
//! bridge hands them to the host UI as-is.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for prompt-manager operations
pub type Result<T> = std::result::Result<T, PromptError>;

/// Main error type for prompt-manager
#[derive(Debug, Error)]
pub enum PromptError {
    /// Command not found in registry
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// Invalid command arguments
    #[error("Invalid arguments for command '{command}': {reason}")]
    InvalidArgs { command: String, reason: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Persistent storage failed to read or write
    #[error("Storage error: {0}")]
    StorageError(String),

    /// No prompt with the given id in the loaded collection
    #[error("Prompt not found: {0}")]
    PromptNotFound(String),

    /// There is no active tab to deliver a message to
    #[error("No active tab")]
    NoActiveTab,

    /// The tab's content script is not listening
    #[error("Tab {0} is not reachable")]
    TabUnreachable(u64),

    /// The content script did not acknowledge in time
    #[error("No acknowledgment after {0:?}")]
    AckTimeout(Duration),

    /// System clipboard could not be written
    #[error("Clipboard error: {0}")]
    ClipboardError(String),

    /// Malformed or unsupported CSS selector
    #[error("Invalid selector '{selector}': {reason}")]
    SelectorError { selector: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Generic error (catch-all)
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for PromptError {
    fn from(err: anyhow::Error) -> Self {
        PromptError::Other(err.to_string())
    }
}

impl From<String> for PromptError {
    fn from(err: String) -> Self {
        PromptError::Other(err)
    }
}

impl From<&str> for PromptError {
    fn from(err: &str) -> Self {
        PromptError::Other(err.to_string())
    }
}

impl PromptError {
    /// Get user-friendly error message for display in the popup
    pub fn user_message(&self) -> String {
        match self {
            PromptError::CommandNotFound(cmd) => {
                format!("Command '{}' not found.", cmd)
            },
            PromptError::InvalidArgs { command, reason } => {
                format!("Invalid arguments for '{}': {}", command, reason)
            },
            PromptError::NoActiveTab => {
                "No active page to insert into. The prompt was copied to the clipboard.".to_string()
            },
            PromptError::TabUnreachable(_) | PromptError::AckTimeout(_) => {
                "The page did not respond. The prompt was copied to the clipboard.".to_string()
            },
            PromptError::ValidationError(msg) => msg.clone(),
            _ => self.to_string(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            PromptError::CommandNotFound(_) => "command",
            PromptError::InvalidArgs { .. } => "arguments",
            PromptError::SerdeError(_) => "serialization",
            PromptError::IoError(_) => "io",
            PromptError::StorageError(_) => "storage",
            PromptError::PromptNotFound(_) => "not_found",
            PromptError::NoActiveTab
            | PromptError::TabUnreachable(_)
            | PromptError::AckTimeout(_) => "messaging",
            PromptError::ClipboardError(_) => "clipboard",
            PromptError::SelectorError { .. } => "selector",
            PromptError::ConfigError(_) => "config",
            PromptError::ValidationError(_) => "validation",
            PromptError::Other(_) => "other",
        }
    }
}
