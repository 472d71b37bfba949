//! End-to-end editor flows: build, local history, remote store

use crate::common::spawn_server;
use timeliner::{Editor, EditorConfig, MemoryStore, RemoteStore};

fn editor() -> Editor<MemoryStore> {
    let config = EditorConfig {
        name: "it".to_string(),
        time_scale: 1.0,
        required_columns: vec!["Event1".to_string()],
        history_capacity: 3,
        default_snapshot: r#"[{"name":"Event1","start":"","stop":"","amount":""},{"name":"EndTime","start":""}]"#.to_string(),
        example_snapshot: r#"[{"name":"Event1","start":"0","stop":"2","amount":"5"},{"name":"EndTime","start":"2"}]"#.to_string(),
    };
    Editor::new(config, MemoryStore::new())
}

#[tokio::test]
async fn test_push_history_entry_to_server_and_load_back() {
    let server = spawn_server().await;
    let remote = RemoteStore::new(&server.url);

    let mut editor = editor();
    editor.load_example();
    let saved = editor.records().to_vec();
    let pointer = editor.save().unwrap();

    let pushed = editor
        .push_history_entry(&remote, pointer as i64, "shared run")
        .await
        .unwrap();
    assert!(pushed);
    assert_eq!(remote.list().await.unwrap(), vec!["shared run"]);

    editor.reset();
    assert_ne!(editor.records(), saved.as_slice());

    editor.load_remote(&remote, "shared run").await.unwrap();
    assert_eq!(editor.records(), saved.as_slice());

    // and the restored records still flatten the same way
    let flat = editor.build().unwrap();
    assert_eq!(flat.column("Event1").unwrap(), &[5.0, 5.0, 5.0]);
}

#[tokio::test]
async fn test_push_empty_slot_is_noop() {
    let server = spawn_server().await;
    let remote = RemoteStore::new(&server.url);

    let editor = editor();
    let pushed = editor.push_history_entry(&remote, 2, "never").await.unwrap();
    assert!(!pushed);
    assert!(remote.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_remote_load_keeps_records() {
    let server = spawn_server().await;
    let remote = RemoteStore::new(&server.url);

    let mut editor = editor();
    editor.load_example();
    let before = editor.records().to_vec();

    // absent snapshot loads as "" which is not a valid structured form
    assert!(editor.load_remote(&remote, "missing").await.is_err());
    assert_eq!(editor.records(), before.as_slice());
}
