//! Cross-context messages between the popup and a page's content script
//!
//! Wire format, as the extension runtime carries it:
//!
//! ```json
//! {"action": "insertPrompt", "promptContent": "..."}   // request
//! {"success": true}                                    // acknowledgment
//! ```
//!
//! Requests travel through a [`TabHub`], which holds one channel per tab and
//! waits a bounded time for the acknowledgment.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use uuid::Uuid;

pub mod content_script;
pub mod hub;

pub use content_script::ContentScript;
pub use hub::{TabHub, TabId};

use crate::errors::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum ContentMessage {
    #[serde(rename = "insertPrompt")]
    InsertPrompt {
        #[serde(rename = "promptContent")]
        prompt_content: String,
    },
}

impl ContentMessage {
    pub fn insert_prompt(content: impl Into<String>) -> Self {
        ContentMessage::InsertPrompt {
            prompt_content: content.into(),
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            ContentMessage::InsertPrompt { .. } => "insertPrompt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// A request in flight to a tab, with the channel its acknowledgment goes back on
#[derive(Debug)]
pub struct Envelope {
    pub id:      Uuid,
    pub message: ContentMessage,
    pub reply:   oneshot::Sender<Ack>,
}

/// Delivers messages to whichever tab is active
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TabMessenger: Send + Sync {
    async fn send_to_active_tab(&self, message: ContentMessage) -> Result<Ack>;
}
