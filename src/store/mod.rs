//! Remote snapshot store: server-side flat files and the client that
//! speaks to them

mod client;
mod file_store;

pub use client::{RemoteStore, RemoteStoreError};
pub use file_store::FileStore;
