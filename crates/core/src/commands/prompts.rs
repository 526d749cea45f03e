use serde_json::{json, Value};

use crate::{
    db::PromptDraft,
    errors::{PromptError, Result},
    popup::PopupController,
    runtime,
};

fn required_str<'a>(args: &'a Value, command: &str, key: &str) -> Result<&'a str> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| PromptError::InvalidArgs {
            command: command.to_string(),
            reason:  format!("missing string '{}'", key),
        })
}

fn view(popup: &PopupController) -> Result<Value> {
    Ok(serde_json::to_value(popup.view())?)
}

/// Re-render from the popup's own collection; storage is only read on open
pub fn list(popup: &mut PopupController, _args: Value) -> Result<Value> {
    view(popup)
}

pub fn search(popup: &mut PopupController, args: Value) -> Result<Value> {
    let query = args.get("query").and_then(|v| v.as_str()).unwrap_or("");
    popup.set_search(query);
    view(popup)
}

pub fn show_pinned(popup: &mut PopupController, _args: Value) -> Result<Value> {
    popup.show_pinned();
    view(popup)
}

pub fn show_all(popup: &mut PopupController, _args: Value) -> Result<Value> {
    popup.show_all();
    view(popup)
}

pub fn begin_add(popup: &mut PopupController, _args: Value) -> Result<Value> {
    popup.begin_add();
    view(popup)
}

pub fn begin_edit(popup: &mut PopupController, args: Value) -> Result<Value> {
    let id = required_str(&args, "prompts.begin_edit", "id")?;
    popup.begin_edit(id)?;
    view(popup)
}

pub fn cancel_edit(popup: &mut PopupController, _args: Value) -> Result<Value> {
    popup.cancel_edit();
    view(popup)
}

/// Validation failures come back as a view with the notice set, not an error
pub fn save(popup: &mut PopupController, args: Value) -> Result<Value> {
    let title = args.get("title").and_then(|v| v.as_str()).unwrap_or("");
    let content = args.get("content").and_then(|v| v.as_str()).unwrap_or("");

    match runtime::block_on(popup.save_draft(PromptDraft::new(title, content))) {
        Ok(_) | Err(PromptError::ValidationError(_)) => view(popup),
        Err(e) => Err(e),
    }
}

pub fn toggle_pin(popup: &mut PopupController, args: Value) -> Result<Value> {
    let id = required_str(&args, "prompts.toggle_pin", "id")?;
    runtime::block_on(popup.toggle_pin(id))?;
    view(popup)
}

pub fn delete(popup: &mut PopupController, args: Value) -> Result<Value> {
    let id = required_str(&args, "prompts.delete", "id")?;
    let confirmed = args
        .get("confirmed")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    let removed = runtime::block_on(popup.delete(id, &|_: &str| confirmed))?;
    Ok(json!({ "removed": removed, "view": popup.view() }))
}

pub fn use_prompt(popup: &mut PopupController, args: Value) -> Result<Value> {
    let id = required_str(&args, "prompts.use", "id")?.to_string();
    let outcome = runtime::block_on(popup.use_prompt(&id))?;
    Ok(json!({ "outcome": outcome, "view": popup.view() }))
}
