use scribe_engine::protocol::{Action, ActionKind};
use scribe_engine::store::{ActionStore, FileActionStore, StoreError};
use tempfile::TempDir;

#[tokio::test]
async fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let store = FileActionStore::new(dir.path().join("session").join("actions.json"));
    let actions = vec![
        Action::navigate("https://example.com"),
        Action::click("#go"),
        Action::type_text("#q", "rust"),
    ];

    store.save(&actions).await.unwrap();
    assert_eq!(store.load().await.unwrap(), actions);
}

#[tokio::test]
async fn test_missing_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    let store = FileActionStore::new(dir.path().join("actions.json"));
    assert!(store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_clear_removes_log() {
    let dir = TempDir::new().unwrap();
    let store = FileActionStore::new(dir.path().join("actions.json"));
    store.save(&[Action::click("#go")]).await.unwrap();

    store.clear().await.unwrap();
    assert!(!store.path().exists());
    assert!(store.load().await.unwrap().is_empty());
    // Clearing twice is fine.
    store.clear().await.unwrap();
}

#[tokio::test]
async fn test_unknown_types_survive_loading() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("actions.json");
    tokio::fs::write(&path, r##"[{"type": "hover", "selector": "#menu"}]"##)
        .await
        .unwrap();

    let actions = FileActionStore::new(&path).load().await.unwrap();
    assert_eq!(actions[0].kind, ActionKind::Unrecognized("hover".to_string()));
}

#[tokio::test]
async fn test_corrupt_log_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("actions.json");
    tokio::fs::write(&path, "{not json").await.unwrap();

    let result = FileActionStore::new(&path).load().await;
    assert!(matches!(result, Err(StoreError::Json(_))));
}
