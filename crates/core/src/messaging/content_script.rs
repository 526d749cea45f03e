//! Page-side request handling
//!
//! A [`ContentScript`] owns access to one page. Attached to a [`TabHub`], it
//! answers every request with an acknowledgment once the work is done.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use super::{Ack, ContentMessage, Envelope, TabHub, TabId};
use crate::inserter::{Clipboard, PageDom, PageInserter};

/// Requests buffered per tab before senders wait
const TAB_CHANNEL_CAPACITY: usize = 8;

pub struct ContentScript<P> {
    page:      Arc<Mutex<P>>,
    clipboard: Arc<dyn Clipboard>,
    inserter:  PageInserter,
}

impl<P> ContentScript<P>
where
    P: PageDom + Send + 'static,
{
    pub fn new(page: Arc<Mutex<P>>, clipboard: Arc<dyn Clipboard>) -> Self {
        Self {
            page,
            clipboard,
            inserter: PageInserter::default(),
        }
    }

    pub fn with_inserter(mut self, inserter: PageInserter) -> Self {
        self.inserter = inserter;
        self
    }

    /// Run one request against the page
    pub async fn handle(&self, message: ContentMessage) -> Ack {
        match message {
            ContentMessage::InsertPrompt { prompt_content } => {
                let mut page = self.page.lock().await;
                match self
                    .inserter
                    .insert(&mut *page, self.clipboard.as_ref(), &prompt_content)
                {
                    Ok(outcome) => {
                        tracing::debug!(?outcome, "insertPrompt handled");
                        Ack::ok()
                    },
                    Err(e) => {
                        tracing::error!(error = %e, "insertPrompt failed");
                        Ack { success: false }
                    },
                }
            },
        }
    }

    /// Register with `hub` under a fresh tab id and start serving
    pub fn attach(self, hub: &TabHub) -> (TabId, JoinHandle<()>) {
        let id = TabHub::next_tab_id();
        let (tx, rx) = mpsc::channel(TAB_CHANNEL_CAPACITY);
        hub.register(id, tx);

        tracing::info!(tab = id, "content script attached");
        (id, tokio::spawn(self.serve(rx)))
    }

    /// Answer requests until every sender is gone
    pub async fn serve(self, mut requests: mpsc::Receiver<Envelope>) {
        while let Some(envelope) = requests.recv().await {
            let request_id = envelope.id;
            let ack = self.handle(envelope.message).await;
            if envelope.reply.send(ack).is_err() {
                tracing::debug!(%request_id, "requester went away before the acknowledgment");
            }
        }
    }
}
