//! Axum web server exposing the flat-file snapshot store

mod error;
mod handlers;
mod server;
mod state;

pub use error::WebError;
pub use handlers::{SnapshotAction, SnapshotRequest};
pub use server::{build_router, run_server, ServerConfig};
pub use state::AppState;
