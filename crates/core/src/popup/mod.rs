//! Popup controller
//!
//! Owns the in-memory prompt list for the lifetime of a popup and turns user
//! intents into store writes. Every mutation saves the whole collection and
//! the next [`PopupController::view`] re-derives the list from scratch.
//!
//! View state:
//! - `filter`: `All` or `Pinned`, remembered while a search is active
//! - `search`: a non-empty query overrides the filter for display
//! - `modal`: closed, or open for a new prompt / an existing id

use std::sync::Arc;

use serde::Serialize;

pub mod view;

pub use view::{ModalView, PopupView, PromptCard, EMPTY_LIST_MESSAGE};

use crate::{
    db::{
        prompts::{next_id, now_millis},
        Prompt, PromptDraft, PromptStore,
    },
    errors::{PromptError, Result},
    filter::{self, FilterMode},
    inserter::Clipboard,
    messaging::{ContentMessage, TabMessenger},
};

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this prompt?";

const PAGE_REJECTED_NOTICE: &str =
    "The page could not insert the prompt. It was copied to the clipboard.";

/// Asks the user a yes/no question
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Modal {
    Closed,
    Open {
        editing: Option<String>,
        draft:   PromptDraft,
    },
}

/// Result of using a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UseOutcome {
    /// The page acknowledged the insertion
    Inserted,
    /// The page answered but could not insert
    Rejected,
    /// No page answered in time
    Undelivered,
}

pub struct PopupController {
    store:     PromptStore,
    messenger: Arc<dyn TabMessenger>,
    clipboard: Arc<dyn Clipboard>,
    prompts:   Vec<Prompt>,
    filter:    FilterMode,
    search:    Option<String>,
    modal:     Modal,
    notice:    Option<String>,
    closed:    bool,
}

impl PopupController {
    /// Open the popup: load the collection and show everything
    pub async fn open(
        store: PromptStore,
        messenger: Arc<dyn TabMessenger>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        let prompts = store.load().await;
        tracing::info!(count = prompts.len(), "popup opened");

        Self {
            store,
            messenger,
            clipboard,
            prompts,
            filter: FilterMode::All,
            search: None,
            modal: Modal::Closed,
            notice: None,
            closed: false,
        }
    }

    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn search_query(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Prompts to display, in display order
    pub fn visible(&self) -> Vec<&Prompt> {
        let selected = match &self.search {
            Some(query) => filter::search(query, &self.prompts),
            None => filter::filter_by(self.filter, &self.prompts),
        };
        filter::order(selected)
    }

    pub fn view(&self) -> PopupView {
        let cards: Vec<PromptCard> = self.visible().into_iter().map(PromptCard::from).collect();
        let modal = match &self.modal {
            Modal::Closed => None,
            Modal::Open { editing, draft } => Some(ModalView {
                editing: editing.clone(),
                title:   draft.title.clone(),
                content: draft.content.clone(),
            }),
        };

        PopupView {
            filter: self.filter,
            search: self.search.clone(),
            empty_message: cards.is_empty().then_some(EMPTY_LIST_MESSAGE),
            cards,
            notice: self.notice.clone(),
            modal,
            closed: self.closed,
        }
    }

    /// Update the search box; blank input returns to the remembered filter
    pub fn set_search(&mut self, input: &str) {
        let query = input.trim();
        self.search = (!query.is_empty()).then(|| query.to_string());
    }

    pub fn show_pinned(&mut self) {
        self.filter = FilterMode::Pinned;
        self.search = None;
    }

    pub fn show_all(&mut self) {
        self.filter = FilterMode::All;
        self.search = None;
    }

    pub fn begin_add(&mut self) {
        self.modal = Modal::Open {
            editing: None,
            draft:   PromptDraft::default(),
        };
        self.notice = None;
    }

    pub fn begin_edit(&mut self, id: &str) -> Result<()> {
        let prompt = self.find(id)?;
        self.modal = Modal::Open {
            editing: Some(prompt.id.clone()),
            draft:   PromptDraft::new(prompt.title.clone(), prompt.content.clone()),
        };
        self.notice = None;
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.modal = Modal::Closed;
        self.notice = None;
    }

    /// Save the modal's contents as a new prompt or over the one being edited
    ///
    /// On validation failure the modal stays open with `draft` in it and
    /// nothing is written.
    pub async fn save_draft(&mut self, draft: PromptDraft) -> Result<Prompt> {
        let editing = match &self.modal {
            Modal::Open { editing, .. } => editing.clone(),
            Modal::Closed => None,
        };

        let (title, content) = match draft.validate() {
            Ok(fields) => fields,
            Err(e) => {
                self.notice = Some(e.user_message());
                self.modal = Modal::Open { editing, draft };
                return Err(e);
            },
        };

        let saved = match editing {
            Some(id) => {
                let Some(prompt) = self.prompts.iter_mut().find(|p| p.id == id) else {
                    self.modal = Modal::Closed;
                    self.notice = Some(format!("Prompt {} no longer exists", id));
                    return Err(PromptError::PromptNotFound(id));
                };
                prompt.title = title;
                prompt.content = content;
                prompt.touch();
                prompt.clone()
            },
            None => {
                let prompt = Prompt {
                    id: next_id(&self.prompts),
                    title,
                    content,
                    is_pinned: false,
                    last_used: Some(now_millis()),
                };
                self.prompts.insert(0, prompt.clone());
                prompt
            },
        };

        self.store.save(&self.prompts).await;
        self.modal = Modal::Closed;
        self.notice = None;

        tracing::info!(id = %saved.id, "prompt saved");
        Ok(saved)
    }

    /// Flip a prompt's pin; returns the new state
    pub async fn toggle_pin(&mut self, id: &str) -> Result<bool> {
        let prompt = self.find_mut(id)?;
        prompt.is_pinned = !prompt.is_pinned;
        let pinned = prompt.is_pinned;

        self.store.save(&self.prompts).await;
        Ok(pinned)
    }

    /// Delete after confirmation; returns whether anything was removed
    pub async fn delete(&mut self, id: &str, confirm: &dyn Confirm) -> Result<bool> {
        self.find(id)?;

        if !confirm.confirm(DELETE_CONFIRMATION) {
            tracing::debug!(id, "delete declined");
            return Ok(false);
        }

        self.prompts.retain(|p| p.id != id);
        self.store.save(&self.prompts).await;

        tracing::info!(id, "prompt deleted");
        Ok(true)
    }

    /// Copy a prompt, send it to the active page and record the use
    ///
    /// Delivery problems are shown as a notice and keep the popup open; the
    /// prompt is still on the clipboard.
    pub async fn use_prompt(&mut self, id: &str) -> Result<UseOutcome> {
        let content = self.find(id)?.content.clone();

        if let Err(e) = self.clipboard.write_text(&content) {
            tracing::warn!(error = %e, "failed to copy prompt to clipboard");
        }

        let delivery = self
            .messenger
            .send_to_active_tab(ContentMessage::insert_prompt(content))
            .await;

        self.find_mut(id)?.touch();
        self.store.save(&self.prompts).await;

        let outcome = match delivery {
            Ok(ack) if ack.success => {
                self.closed = true;
                self.notice = None;
                UseOutcome::Inserted
            },
            Ok(_) => {
                self.notice = Some(PAGE_REJECTED_NOTICE.to_string());
                UseOutcome::Rejected
            },
            Err(e) => {
                tracing::warn!(error = %e, "prompt not delivered to page");
                self.notice = Some(e.user_message());
                UseOutcome::Undelivered
            },
        };

        Ok(outcome)
    }

    fn find(&self, id: &str) -> Result<&Prompt> {
        self.prompts
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| PromptError::PromptNotFound(id.to_string()))
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Prompt> {
        self.prompts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| PromptError::PromptNotFound(id.to_string()))
    }
}
