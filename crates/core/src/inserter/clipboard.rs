//! System clipboard access
//!
//! The clipboard is the degradation path when no page element can take the
//! text, and the popup also copies a prompt there before sending it.

use std::sync::Mutex;

use crate::errors::{PromptError, Result};

pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// OS clipboard through `arboard`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| PromptError::ClipboardError(format!("Failed to access clipboard: {}", e)))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| PromptError::ClipboardError(e.to_string()))
    }
}

/// Clipboard that only remembers the last text written
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    text: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.text.lock().ok().and_then(|text| text.clone())
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut slot = self
            .text
            .lock()
            .map_err(|_| PromptError::ClipboardError("clipboard lock poisoned".into()))?;
        *slot = Some(text.to_string());
        Ok(())
    }
}
