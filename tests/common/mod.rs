//! Shared test utilities
//!
//! Spins up a real snapshot server on an ephemeral port so integration
//! tests can drive it with the actual client.

use std::net::SocketAddr;

use timeliner::web::{build_router, AppState};
use timeliner::FileStore;

/// A running snapshot server over a temp directory.
///
/// The server task is aborted and the directory removed on drop.
pub struct TestServer {
    pub url: String,
    pub dir: tempfile::TempDir,
    handle: tokio::task::JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Start a snapshot server on 127.0.0.1 with an OS-assigned port.
pub async fn spawn_server() -> TestServer {
    let dir = tempfile::tempdir().expect("create temp store dir");
    let store = FileStore::open(dir.path()).expect("open file store");
    let app = build_router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr: SocketAddr = listener.local_addr().expect("local addr");

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    TestServer {
        url: format!("http://{addr}/"),
        dir,
        handle,
    }
}
