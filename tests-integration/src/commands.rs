//! Integration tests for command dispatch driving a real popup

use std::{sync::Arc, time::Duration};

use prompt_manager_core::{
    commands,
    db::{FileStorage, MemoryStorage, Prompt, PromptStore},
    inserter::{Element, MemoryClipboard, MemoryPage, PageDom},
    messaging::{ContentScript, TabHub},
    popup::PopupController,
    runtime,
    seeder::InstallSeeder,
    Bridge,
};
use serde_json::json;
use tokio::sync::Mutex;

struct Fixture {
    bridge:    Bridge,
    page:      Arc<Mutex<MemoryPage>>,
    clipboard: Arc<MemoryClipboard>,
    _dir:      tempfile::TempDir,
}

/// Seeded file-backed store, one tab with a focused textarea
fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let store = runtime::block_on(async {
        let storage = FileStorage::open(&path).await.unwrap();
        let store = PromptStore::new(Arc::new(storage));
        let seeder = InstallSeeder::new(store.clone(), "1.0");
        seeder.seed().await.unwrap();
        seeder.pin_popular().await.unwrap();
        store
    });

    let mut page = MemoryPage::new();
    let textarea = page.append(page.body(), Element::new("textarea"));
    page.focus(textarea);
    let page = Arc::new(Mutex::new(page));

    let clipboard = Arc::new(MemoryClipboard::new());
    let hub = TabHub::new(Duration::from_secs(1));
    let script = ContentScript::new(page.clone(), clipboard.clone());
    let (tab, _) = runtime::block_on(async { script.attach(&hub) });
    hub.activate(tab).unwrap();

    let popup = runtime::block_on(PopupController::open(
        store,
        Arc::new(hub),
        clipboard.clone(),
    ));

    Fixture {
        bridge: Bridge::new(popup),
        page,
        clipboard,
        _dir: dir,
    }
}

#[test]
fn test_command_not_found() {
    let mut fx = fixture();
    let result = fx.bridge.call("nonexistent_command", json!({}));
    assert_eq!(result["error"], json!(true));
}

#[test]
fn test_list_commands() {
    let commands = commands::list_commands();

    assert!(!commands.is_empty());
    assert!(commands.contains(&"prompts.use".to_string()));
    assert!(!commands.contains(&"ping".to_string()));
}

#[test]
fn test_list_shows_pinned_defaults_first() {
    let mut fx = fixture();
    let view = fx.bridge.call("prompts.list", json!({}));

    let cards = view["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 8);
    let pinned = cards.iter().take_while(|c| c["isPinned"] == json!(true)).count();
    assert_eq!(pinned, 5);
    assert_eq!(cards[5]["pinLabel"], json!("Pin"));
}

#[test]
fn test_search_then_use_inserts_into_page() {
    let mut fx = fixture();

    let view = fx.bridge.call("prompts.search", json!({"query": "linux"}));
    let cards = view["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 1);
    let id = cards[0]["id"].as_str().unwrap().to_string();

    let result = fx.bridge.call("prompts.use", json!({"id": id}));
    assert_eq!(result["outcome"], json!("inserted"));
    assert_eq!(result["view"]["closed"], json!(true));

    let expected = fx
        .bridge
        .popup()
        .prompts()
        .iter()
        .find(|p| p.id == id)
        .unwrap()
        .content
        .clone();
    let page = runtime::block_on(fx.page.lock());
    let textarea = page.active_element().unwrap();
    assert_eq!(page.value(textarea), expected);
    assert_eq!(fx.clipboard.contents(), Some(expected));
}

#[test]
fn test_save_with_blank_content_reports_notice() {
    let mut fx = fixture();
    fx.bridge.call("prompts.begin_add", json!({}));

    let view = fx
        .bridge
        .call("prompts.save", json!({"title": "Draft", "content": "   "}));

    assert_eq!(view["notice"], json!("Please fill in both title and content"));
    assert_eq!(view["modal"]["title"], json!("Draft"));
    assert_eq!(view["cards"].as_array().unwrap().len(), 8);
}

#[test]
fn test_add_edit_delete_cycle() {
    let mut fx = fixture();

    fx.bridge.call("prompts.begin_add", json!({}));
    fx.bridge
        .call("prompts.save", json!({"title": "Mine", "content": "my text"}));
    let id = fx.bridge.popup().prompts()[0].id.clone();

    fx.bridge.call("prompts.begin_edit", json!({"id": id}));
    let view = fx
        .bridge
        .call("prompts.save", json!({"title": "Mine v2", "content": "my text"}));
    assert!(view["modal"].is_null());
    assert_eq!(fx.bridge.popup().prompts()[0].title, "Mine v2");

    let kept = fx
        .bridge
        .call("prompts.delete", json!({"id": id, "confirmed": false}));
    assert_eq!(kept["removed"], json!(false));
    assert_eq!(fx.bridge.popup().prompts().len(), 9);

    let gone = fx
        .bridge
        .call("prompts.delete", json!({"id": id, "confirmed": true}));
    assert_eq!(gone["removed"], json!(true));
    assert!(fx.bridge.popup().prompts().iter().all(|p| p.id != id));
}

#[test]
fn test_pinned_view_and_toggle() {
    let mut fx = fixture();

    let view = fx.bridge.call("prompts.show_pinned", json!({}));
    assert_eq!(view["cards"].as_array().unwrap().len(), 5);
    let id = view["cards"][0]["id"].as_str().unwrap().to_string();

    let view = fx.bridge.call("prompts.toggle_pin", json!({"id": id}));
    assert_eq!(view["filter"], json!("pinned"));
    assert_eq!(view["cards"].as_array().unwrap().len(), 4);

    let view = fx.bridge.call("prompts.show_all", json!({}));
    assert_eq!(view["cards"].as_array().unwrap().len(), 8);
}

#[test]
fn test_use_without_active_tab_keeps_popup_open() {
    let store = PromptStore::new(Arc::new(MemoryStorage::new()));
    runtime::block_on(store.save(&[Prompt::new("1", "T", "text")]));
    let clipboard = Arc::new(MemoryClipboard::new());
    let popup = runtime::block_on(PopupController::open(
        store,
        Arc::new(TabHub::new(Duration::from_millis(10))),
        clipboard.clone(),
    ));
    let mut bridge = Bridge::new(popup);

    let result = bridge.call("prompts.use", json!({"id": "1"}));

    assert_eq!(result["outcome"], json!("undelivered"));
    assert_eq!(result["view"]["closed"], json!(false));
    assert!(result["view"]["notice"].as_str().unwrap().contains("clipboard"));
    assert_eq!(clipboard.contents().as_deref(), Some("text"));
}

fn memory_bridge(storage: &Arc<MemoryStorage>) -> Bridge {
    let store = PromptStore::new(storage.clone());
    runtime::block_on(store.save(&[Prompt::new("1", "A", "first"), Prompt::new("2", "B", "second")]));
    let popup = runtime::block_on(PopupController::open(
        store,
        Arc::new(TabHub::new(Duration::from_millis(10))),
        Arc::new(MemoryClipboard::new()),
    ));
    Bridge::new(popup)
}

#[test]
fn test_list_keeps_state_after_failed_save() {
    let storage = Arc::new(MemoryStorage::new());
    let mut bridge = memory_bridge(&storage);

    storage.fail_writes(true);
    bridge.call("prompts.toggle_pin", json!({"id": "1"}));
    let view = bridge.call("prompts.list", json!({}));

    let card = view["cards"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == json!("1"))
        .unwrap();
    assert_eq!(card["isPinned"], json!(true));
}

#[test]
fn test_list_during_read_failure_keeps_library() {
    let storage = Arc::new(MemoryStorage::new());
    let mut bridge = memory_bridge(&storage);

    storage.fail_reads(true);
    let view = bridge.call("prompts.list", json!({}));
    assert_eq!(view["cards"].as_array().unwrap().len(), 2);
    storage.fail_reads(false);

    bridge.call("prompts.begin_add", json!({}));
    bridge.call("prompts.save", json!({"title": "New", "content": "third"}));

    let persisted = runtime::block_on(PromptStore::new(storage.clone()).load());
    let titles: Vec<&str> = persisted.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["New", "A", "B"]);
}
