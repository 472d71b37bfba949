//! Shared state for the snapshot server

use crate::store::FileStore;

/// Cloneable application state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    store: FileStore,
}

impl AppState {
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &FileStore {
        &self.store
    }
}
