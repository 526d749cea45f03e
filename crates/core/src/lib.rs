//! prompt-manager-rs: core of a prompt library browser extension
//!
//! Stores reusable text prompts and inserts one into the focused text field
//! of the current page. Features:
//! - Prompt library (add, edit, delete, pin, search)
//! - Pinned-first, most-recently-used ordering
//! - Page insertion with fallback targets and a clipboard fallback
//! - Default prompts seeded on install
//!
//! ## Architecture
//!
//! - **Popup** (`popup`, `commands`, `bridge`): user intents over an owned prompt list
//! - **Background** (`seeder`): install-time seeding
//! - **Content script** (`messaging::ContentScript`, `inserter`): writes into the page
//! - **Storage** (`db`): flat key-value record with `prompts` and `extensionVersion`
//!
//! Host facilities (storage area, page document, tabs, clipboard) sit behind
//! traits so each surface runs against real or in-memory implementations.

// Module declarations
pub mod bridge;
pub mod commands;
pub mod config;
pub mod db;
pub mod errors;
pub mod filter;
pub mod inserter;
pub mod logging;
pub mod messaging;
pub mod popup;
pub mod runtime;
pub mod seeder;

pub use bridge::Bridge;
pub use config::Config;
pub use db::{Prompt, PromptStore};
pub use errors::{PromptError, Result};
