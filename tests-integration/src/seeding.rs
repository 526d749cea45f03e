//! Install seeding against file-backed storage

use std::{sync::Arc, time::Duration};

use prompt_manager_core::{
    db::{FileStorage, Prompt, PromptStore},
    runtime,
    seeder::{default_prompts, InstallSeeder, SeedOutcome, POPULAR_PROMPT_TITLES},
};

fn file_store(dir: &tempfile::TempDir) -> PromptStore {
    let storage = runtime::block_on(FileStorage::open(dir.path().join("storage.json"))).unwrap();
    PromptStore::new(Arc::new(storage))
}

#[test]
fn test_install_then_reinstall_same_version_keeps_user_edits() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(&dir);
    let seeder = InstallSeeder::new(store.clone(), "1.0");

    let outcome = runtime::block_on(seeder.seed()).unwrap();
    assert_eq!(outcome, SeedOutcome::Seeded { count: default_prompts().len() });

    let mut prompts = runtime::block_on(store.load());
    prompts.insert(0, Prompt::new("mine", "Mine", "my prompt"));
    assert!(runtime::block_on(store.save(&prompts)));

    let outcome = runtime::block_on(InstallSeeder::new(file_store(&dir), "1.0").seed()).unwrap();
    assert_eq!(outcome, SeedOutcome::Kept { count: prompts.len() });
    assert_eq!(runtime::block_on(store.load())[0].id, "mine");
}

#[test]
fn test_pin_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(&dir);
    runtime::block_on(store.save(&[
        Prompt::new("1", "Linux Terminal", "terminal"),
        Prompt::new("2", "Other", "other"),
    ]));

    let seeder = InstallSeeder::new(store.clone(), "1.0")
        .with_popular(POPULAR_PROMPT_TITLES.iter().map(|t| t.to_string()).collect());
    runtime::block_on(seeder.pin_popular()).unwrap();

    let prompts = runtime::block_on(store.load());
    let linux = prompts.iter().find(|p| p.title == "Linux Terminal").unwrap();
    let other = prompts.iter().find(|p| p.title == "Other").unwrap();
    assert!(linux.is_pinned);
    assert!(!other.is_pinned);
}

#[test]
fn test_on_installed_pins_after_seeding() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(&dir);

    let (seed, pin) = InstallSeeder::new(store.clone(), "2.0")
        .with_pin_delay(Duration::from_millis(50))
        .on_installed();
    runtime::block_on(async {
        seed.await.unwrap();
        pin.await.unwrap();
    });

    let prompts = runtime::block_on(store.load());
    assert_eq!(prompts.len(), default_prompts().len());
    assert_eq!(prompts.iter().filter(|p| p.is_pinned).count(), POPULAR_PROMPT_TITLES.len());
    assert_eq!(
        runtime::block_on(store.installed_version()).unwrap().as_deref(),
        Some("2.0")
    );
}
