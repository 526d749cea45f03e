//! Install-time seeding
//!
//! Two independent passes run when the extension is installed or updated:
//! - `seed` writes the default prompts if the store is empty or was seeded by
//!   another version
//! - `pin_popular` marks the popular defaults as pinned, after a delay so the
//!   seed write has landed

use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;

pub mod defaults;

pub use defaults::{default_prompts, POPULAR_PROMPT_TITLES};

use crate::{
    db::{Prompt, PromptStore},
    errors::Result,
    runtime,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum SeedOutcome {
    Seeded { count: usize },
    Kept { count: usize },
}

#[derive(Clone)]
pub struct InstallSeeder {
    store:     PromptStore,
    version:   String,
    defaults:  Vec<Prompt>,
    popular:   Vec<String>,
    pin_delay: Duration,
}

impl InstallSeeder {
    pub fn new(store: PromptStore, version: impl Into<String>) -> Self {
        Self {
            store,
            version: version.into(),
            defaults: default_prompts(),
            popular: POPULAR_PROMPT_TITLES.iter().map(|t| t.to_string()).collect(),
            pin_delay: Duration::from_secs(1),
        }
    }

    pub fn with_defaults(mut self, defaults: Vec<Prompt>) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_popular(mut self, popular: Vec<String>) -> Self {
        self.popular = popular;
        self
    }

    pub fn with_pin_delay(mut self, delay: Duration) -> Self {
        self.pin_delay = delay;
        self
    }

    /// Write the defaults unless a non-empty store of this version exists
    pub async fn seed(&self) -> Result<SeedOutcome> {
        let existing = self.store.try_load().await?;
        let installed = self.store.installed_version().await?;

        if !existing.is_empty() && installed.as_deref() == Some(self.version.as_str()) {
            tracing::info!(count = existing.len(), "found existing prompts");
            return Ok(SeedOutcome::Kept {
                count: existing.len(),
            });
        }

        self.store.install(&self.defaults, &self.version).await?;
        tracing::info!(
            count = self.defaults.len(),
            version = %self.version,
            previous = ?installed,
            "installed default prompts"
        );
        Ok(SeedOutcome::Seeded {
            count: self.defaults.len(),
        })
    }

    /// Pin every stored prompt whose title is popular; returns how many matched
    ///
    /// Does nothing when no collection is stored yet.
    pub async fn pin_popular(&self) -> Result<usize> {
        let mut prompts = self.store.try_load().await?;
        if prompts.is_empty() {
            return Ok(0);
        }

        let mut matched = 0;
        for prompt in prompts.iter_mut() {
            if self.popular.iter().any(|title| *title == prompt.title) {
                prompt.is_pinned = true;
                matched += 1;
            }
        }

        self.store.try_save(&prompts).await?;
        tracing::info!(matched, "set popular prompts as pinned");
        Ok(matched)
    }

    /// Start both passes on the caller's runtime, or the worker pool
    ///
    /// Failures are logged; neither pass waits for the other.
    pub fn on_installed(&self) -> (JoinHandle<()>, JoinHandle<()>) {
        let seeder = self.clone();
        let seed = runtime::spawn(async move {
            if let Err(e) = seeder.seed().await {
                tracing::error!(error = %e, "failed to seed default prompts");
            }
        });

        let seeder = self.clone();
        let pin = runtime::spawn(async move {
            tokio::time::sleep(seeder.pin_delay).await;
            if let Err(e) = seeder.pin_popular().await {
                tracing::error!(error = %e, "failed to pin popular prompts");
            }
        });

        (seed, pin)
    }
}
