//! Page insertion
//!
//! Writes prompt text into the page the user is looking at:
//!
//! 1. the focused element, if it is a plain text field or rich-text region
//! 2. otherwise the target chosen by the first matching [`TargetStrategy`]
//! 3. otherwise the system clipboard
//!
//! Reaching the clipboard is a successful outcome, not an error.

use serde::Serialize;

pub mod clipboard;
pub mod dom;
pub mod selector;

pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use dom::{DomEvent, Element, MemoryPage, NodeId, PageDom};
pub use selector::Selector;

use crate::errors::Result;

/// Fallback selectors, most generic first
pub const DEFAULT_TARGET_SELECTORS: &[&str] = &[
    "textarea",
    "input[type=\"text\"]",
    "[contenteditable=\"true\"]",
    ".chat-input",
    "#chat-input",
    "[data-testid*=\"input\"]",
];

/// `input` types that hold free text
const TEXT_INPUT_TYPES: &[&str] = &["text", "search", "email", "url", "tel", "password"];

/// Which of several matching elements a strategy picks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickPolicy {
    First,
    /// Chat UIs append a fresh input per turn, so the last match is the live one
    Last,
}

impl PickPolicy {
    fn pick(self, matches: &[NodeId]) -> Option<NodeId> {
        match self {
            PickPolicy::First => matches.first().copied(),
            PickPolicy::Last => matches.last().copied(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetStrategy {
    pub selector: Selector,
    pub pick:     PickPolicy,
}

impl TargetStrategy {
    pub fn new(selector: &str, pick: PickPolicy) -> Result<Self> {
        Ok(Self {
            selector: Selector::parse(selector)?,
            pick,
        })
    }
}

/// How an element takes text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditableKind {
    /// `textarea` or text-like `input`: written through `value`
    TextField,
    /// `contenteditable`: written through text content
    RichText,
}

pub fn classify<P: PageDom + ?Sized>(page: &P, node: NodeId) -> Option<EditableKind> {
    match page.tag_name(node) {
        Some("textarea") => return Some(EditableKind::TextField),
        Some("input") => {
            let is_text = page
                .attribute(node, "type")
                .map(|t| TEXT_INPUT_TYPES.iter().any(|ok| t.eq_ignore_ascii_case(ok)))
                .unwrap_or(true);
            if is_text {
                return Some(EditableKind::TextField);
            }
        },
        _ => {},
    }

    page.is_content_editable(node)
        .then_some(EditableKind::RichText)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InsertOutcome {
    Focused { node: NodeId },
    Fallback { node: NodeId, selector: String },
    Clipboard,
}

#[derive(Debug, Clone)]
pub struct PageInserter {
    strategies: Vec<TargetStrategy>,
}

impl Default for PageInserter {
    fn default() -> Self {
        let strategies = DEFAULT_TARGET_SELECTORS
            .iter()
            .filter_map(|s| TargetStrategy::new(s, PickPolicy::Last).ok())
            .collect();
        Self { strategies }
    }
}

impl PageInserter {
    pub fn new(strategies: Vec<TargetStrategy>) -> Self {
        Self { strategies }
    }

    pub fn strategies(&self) -> &[TargetStrategy] {
        &self.strategies
    }

    /// First strategy with any match decides the target
    pub fn find_target<P: PageDom + ?Sized>(&self, page: &P) -> Option<(NodeId, &TargetStrategy)> {
        self.strategies.iter().find_map(|strategy| {
            let matches = strategy.selector.query_all(page);
            strategy.pick.pick(&matches).map(|node| (node, strategy))
        })
    }

    pub fn insert<P: PageDom + ?Sized>(
        &self,
        page: &mut P,
        clipboard: &dyn Clipboard,
        text: &str,
    ) -> Result<InsertOutcome> {
        if let Some(node) = page.active_element() {
            if let Some(kind) = classify(page, node) {
                write_text(page, node, kind, text);
                page.dispatch_event(node, &DomEvent::bubbling("input"));
                page.dispatch_event(node, &DomEvent::bubbling("change"));
                page.focus(node);

                tracing::info!(node = node.0, "prompt inserted into focused element");
                return Ok(InsertOutcome::Focused { node });
            }
        }

        if let Some((node, strategy)) = self.find_target(page) {
            let selector = strategy.selector.to_string();
            page.focus(node);
            write_text(page, node, fallback_kind(page, node), text);
            page.dispatch_event(node, &DomEvent::bubbling("input"));

            tracing::info!(node = node.0, %selector, "prompt inserted into fallback element");
            return Ok(InsertOutcome::Fallback { node, selector });
        }

        tracing::info!("no suitable text input found on the page, copying to clipboard");
        clipboard.write_text(text)?;
        Ok(InsertOutcome::Clipboard)
    }
}

/// Fallback targets are written by tag: any `input` or `textarea` takes a value
fn fallback_kind<P: PageDom + ?Sized>(page: &P, node: NodeId) -> EditableKind {
    match page.tag_name(node) {
        Some("input") | Some("textarea") => EditableKind::TextField,
        _ => EditableKind::RichText,
    }
}

fn write_text<P: PageDom + ?Sized>(page: &mut P, node: NodeId, kind: EditableKind, text: &str) {
    match kind {
        EditableKind::TextField => page.set_value(node, text),
        EditableKind::RichText => page.set_text_content(node, text),
    }
}
