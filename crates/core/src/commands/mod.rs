//! Command registry and dispatch system
//!
//! This module provides a static registry of commands the popup shell can
//! call. Commands are registered as "category.action" (e.g. "prompts.list",
//! "prompts.save") and dispatched to handler functions that drive a
//! [`PopupController`].
//!
//! ## Adding a new command
//!
//! 1. Create handler function: `pub fn my_command(popup: &mut PopupController, args: Value) -> Result<Value>`
//! 2. Register in `REGISTRY`: `("category.action", my_command as CommandHandler)`
//! 3. Add tests for the command

use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;

use crate::errors::{PromptError, Result};
use crate::popup::PopupController;

pub mod prompts;

/// Type alias for command handler functions
///
/// Handlers take the popup plus JSON arguments and return JSON.
pub type CommandHandler = fn(&mut PopupController, Value) -> Result<Value>;

/// Static command registry
///
/// Maps command names to handler functions. Initialized lazily on first access.
static REGISTRY: Lazy<HashMap<&'static str, CommandHandler>> = Lazy::new(|| {
    let mut map = HashMap::new();

    map.insert("prompts.list", prompts::list as CommandHandler);
    map.insert("prompts.search", prompts::search as CommandHandler);
    map.insert("prompts.show_pinned", prompts::show_pinned as CommandHandler);
    map.insert("prompts.show_all", prompts::show_all as CommandHandler);
    map.insert("prompts.begin_add", prompts::begin_add as CommandHandler);
    map.insert("prompts.begin_edit", prompts::begin_edit as CommandHandler);
    map.insert("prompts.cancel_edit", prompts::cancel_edit as CommandHandler);
    map.insert("prompts.save", prompts::save as CommandHandler);
    map.insert("prompts.toggle_pin", prompts::toggle_pin as CommandHandler);
    map.insert("prompts.delete", prompts::delete as CommandHandler);
    map.insert("prompts.use", prompts::use_prompt as CommandHandler);

    map
});

/// Dispatch a command by name
///
/// # Arguments
/// * `popup` - Popup the command acts on
/// * `command` - Command name (e.g., "prompts.list")
/// * `args` - Command arguments as JSON Value
///
/// # Returns
/// Command result as JSON Value, or error if command not found
pub fn dispatch(popup: &mut PopupController, command: &str, args: Value) -> Result<Value> {
    match REGISTRY.get(command) {
        Some(handler) => handler(popup, args),
        None => Err(PromptError::CommandNotFound(command.to_string())),
    }
}

/// List all available commands
///
/// Returns a sorted list of all registered command names.
pub fn list_commands() -> Vec<String> {
    let mut commands: Vec<String> = REGISTRY.keys().map(|&k| k.to_string()).collect();
    commands.sort();
    commands
}
