//! Render model handed to the popup shell

use serde::Serialize;

use crate::db::Prompt;
use crate::filter::FilterMode;

/// Characters of content shown under each title
pub const PREVIEW_CHARS: usize = 100;

pub const EMPTY_LIST_MESSAGE: &str = "No prompts to show.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptCard {
    pub id:        String,
    pub title:     String,
    pub preview:   String,
    pub is_pinned: bool,
    pub pin_label: &'static str,
}

impl From<&Prompt> for PromptCard {
    fn from(prompt: &Prompt) -> Self {
        Self {
            id:        prompt.id.clone(),
            title:     prompt.title.clone(),
            preview:   preview(&prompt.content),
            is_pinned: prompt.is_pinned,
            pin_label: if prompt.is_pinned { "Unpin" } else { "Pin" },
        }
    }
}

fn preview(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalView {
    /// `None` while adding a new prompt
    pub editing: Option<String>,
    pub title:   String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupView {
    pub filter:        FilterMode,
    pub search:        Option<String>,
    pub cards:         Vec<PromptCard>,
    /// Set when there are no cards
    pub empty_message: Option<&'static str>,
    pub notice:        Option<String>,
    pub modal:         Option<ModalView>,
    /// The popup should close itself
    pub closed:        bool,
}
