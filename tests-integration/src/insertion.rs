//! Insertion scenarios delivered through the tab hub

use std::{sync::Arc, time::Duration};

use prompt_manager_core::{
    inserter::{Element, MemoryClipboard, MemoryPage, PageDom},
    messaging::{ContentMessage, ContentScript, TabHub, TabMessenger},
};
use tokio::sync::Mutex;

async fn deliver(page: MemoryPage, text: &str) -> (MemoryPage, Arc<MemoryClipboard>) {
    let page = Arc::new(Mutex::new(page));
    let clipboard = Arc::new(MemoryClipboard::new());
    let hub = TabHub::new(Duration::from_secs(1));

    let (tab, _task) = ContentScript::new(page.clone(), clipboard.clone()).attach(&hub);
    hub.activate(tab).unwrap();

    let ack = hub
        .send_to_active_tab(ContentMessage::insert_prompt(text))
        .await
        .unwrap();
    assert!(ack.success);

    let page = page.lock().await.clone();
    (page, clipboard)
}

#[tokio::test]
async fn test_focused_textarea_receives_text_and_events() {
    let mut page = MemoryPage::new();
    let textarea = page.append(page.body(), Element::new("textarea"));
    let on_input = page.add_event_listener(textarea, "input");
    let on_change = page.add_event_listener(textarea, "change");
    page.focus(textarea);

    let (page, clipboard) = deliver(page, "hello").await;

    assert_eq!(page.value(textarea), "hello");
    assert_eq!(page.observed(on_input).len(), 1);
    assert_eq!(page.observed(on_change).len(), 1);
    assert_eq!(clipboard.contents(), None);
}

#[tokio::test]
async fn test_last_chat_input_wins() {
    let mut page = MemoryPage::new();
    let thread = page.append(page.body(), Element::new("main"));
    let first = page.append(thread, Element::new("div").class("chat-input"));
    let second = page.append(thread, Element::new("div").class("chat-input"));

    let (page, _) = deliver(page, "hi").await;

    assert_eq!(page.text_content(second), "hi");
    assert_eq!(page.text_content(first), "");
    assert_eq!(page.active_element(), Some(second));
}

#[tokio::test]
async fn test_no_target_falls_back_to_clipboard() {
    let mut page = MemoryPage::new();
    page.append(page.body(), Element::new("article"));
    let before = page.clone();

    let (page, clipboard) = deliver(page, "hi").await;

    assert_eq!(clipboard.contents().as_deref(), Some("hi"));
    assert_eq!(page, before);
}

#[tokio::test]
async fn test_rich_editor_inside_page() {
    let mut page = MemoryPage::new();
    let editor = page.append(
        page.body(),
        Element::new("div").attr("contenteditable", "true").class("ProseMirror"),
    );
    let paragraph = page.append(editor, Element::new("p"));
    let on_input = page.add_event_listener(page.body(), "input");
    page.focus(paragraph);

    let (page, _) = deliver(page, "rich text").await;

    // Focus sat on a paragraph inside the editor; the paragraph takes the text
    assert_eq!(page.text_content(paragraph), "rich text");
    assert_eq!(page.observed(on_input), &[paragraph]);
}
