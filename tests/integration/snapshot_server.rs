//! Client/server round trips over a real socket

use crate::common::spawn_server;
use timeliner::RemoteStore;

#[tokio::test]
async fn test_list_starts_empty() {
    let server = spawn_server().await;
    let remote = RemoteStore::new(&server.url);

    assert!(remote.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_save_list_load_delete_cycle() {
    let server = spawn_server().await;
    let remote = RemoteStore::new(&server.url);

    let snapshot = r#"[{"name":"Event1","start":"0","stop":"2","amount":"5"},{"name":"EndTime","start":"2"}]"#;
    remote.save("first run", snapshot).await.unwrap();

    assert_eq!(remote.list().await.unwrap(), vec!["first run"]);
    assert_eq!(remote.load("first run").await.unwrap(), snapshot);
    assert!(server.dir.path().join("first run").is_file());

    remote.delete("first run").await.unwrap();
    assert!(remote.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_save_non_array_is_not_stored() {
    let server = spawn_server().await;
    let remote = RemoteStore::new(&server.url);

    remote.save("bad", "not a snapshot").await.unwrap();
    assert!(remote.list().await.unwrap().is_empty());
    assert_eq!(remote.load("bad").await.unwrap(), "");
}

#[tokio::test]
async fn test_names_sanitized_on_the_server() {
    let server = spawn_server().await;
    let remote = RemoteStore::new(&server.url);

    remote.save("run/../one", "[]").await.unwrap();
    assert_eq!(remote.list().await.unwrap(), vec!["run____one"]);
    // the unsanitized name still resolves to the same snapshot
    assert_eq!(remote.load("run/../one").await.unwrap(), "[]");
}

#[tokio::test]
async fn test_load_absent_is_empty() {
    let server = spawn_server().await;
    let remote = RemoteStore::new(&server.url);

    assert_eq!(remote.load("never saved").await.unwrap(), "");
}

#[tokio::test]
async fn test_unreachable_server_is_an_error() {
    // nothing listens here
    let remote = RemoteStore::new("http://127.0.0.1:1/");
    assert!(remote.list().await.is_err());
}
