//! Tab registry and request delivery

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

use super::{Ack, ContentMessage, Envelope, TabMessenger};
use crate::errors::{PromptError, Result};

/// Tab ID type
pub type TabId = u64;

/// Global tab ID counter
static NEXT_TAB_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Default)]
struct Tabs {
    senders: HashMap<TabId, mpsc::Sender<Envelope>>,
    active:  Option<TabId>,
}

/// Hub holding one content-script channel per open tab
#[derive(Clone)]
pub struct TabHub {
    tabs:        Arc<Mutex<Tabs>>,
    ack_timeout: Duration,
}

impl TabHub {
    pub fn new(ack_timeout: Duration) -> Self {
        Self {
            tabs: Arc::new(Mutex::new(Tabs::default())),
            ack_timeout,
        }
    }

    /// Generate a unique tab ID
    pub fn next_tab_id() -> TabId {
        NEXT_TAB_ID.fetch_add(1, Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, Tabs> {
        // Tab bookkeeping stays consistent even if a holder panicked
        self.tabs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register a tab's content-script channel
    pub fn register(&self, id: TabId, sender: mpsc::Sender<Envelope>) {
        self.lock().senders.insert(id, sender);
    }

    /// Unregister a tab; it stops being active if it was
    pub fn unregister(&self, id: TabId) {
        let mut tabs = self.lock();
        tabs.senders.remove(&id);
        if tabs.active == Some(id) {
            tabs.active = None;
        }
    }

    pub fn activate(&self, id: TabId) -> Result<()> {
        let mut tabs = self.lock();
        if !tabs.senders.contains_key(&id) {
            return Err(PromptError::TabUnreachable(id));
        }
        tabs.active = Some(id);
        Ok(())
    }

    pub fn active_tab(&self) -> Option<TabId> {
        self.lock().active
    }

    /// Send to one tab and wait for its acknowledgment
    pub async fn send_to_tab(&self, id: TabId, message: ContentMessage) -> Result<Ack> {
        let sender = self
            .lock()
            .senders
            .get(&id)
            .cloned()
            .ok_or(PromptError::TabUnreachable(id))?;

        let (reply, ack) = oneshot::channel();
        let envelope = Envelope {
            id: Uuid::new_v4(),
            message,
            reply,
        };
        let request_id = envelope.id;
        tracing::debug!(tab = id, %request_id, action = envelope.message.action(), "sending to tab");

        let deliver_and_wait = async move {
            sender
                .send(envelope)
                .await
                .map_err(|_| PromptError::TabUnreachable(id))?;
            ack.await.map_err(|_| PromptError::TabUnreachable(id))
        };

        match tokio::time::timeout(self.ack_timeout, deliver_and_wait).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(tab = id, %request_id, timeout = ?self.ack_timeout, "no acknowledgment from tab");
                Err(PromptError::AckTimeout(self.ack_timeout))
            },
        }
    }
}

#[async_trait]
impl TabMessenger for TabHub {
    async fn send_to_active_tab(&self, message: ContentMessage) -> Result<Ack> {
        let id = self.active_tab().ok_or(PromptError::NoActiveTab)?;
        self.send_to_tab(id, message).await
    }
}
