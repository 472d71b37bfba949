//! Fixed-capacity circular snapshot history over a key/value store
//!
//! Three kinds of keys per editor namespace, mirroring what the browser
//! editor kept in localStorage:
//!   `<ns>History_newest` — pointer to the most recent slot
//!   `<ns>History_json_<p>` — snapshot stored in slot `p`
//!   `<ns>History_timestamp_<p>` — when slot `p` was written

use std::collections::HashMap;
use std::sync::Mutex;

use crate::util::wrap_index;

/// Error type for history operations.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("lock poisoned")]
    LockPoisoned,
}

/// Namespaced persistent key/value capability.
///
/// Passed into [`History`] explicitly instead of being reached through a
/// global, so tests can run against [`MemoryStore`] while the binary
/// uses the sqlite-backed [`crate::data::Database`].
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, HistoryError>;
    fn set(&self, key: &str, value: &str) -> Result<(), HistoryError>;
}

/// In-process key/value store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, HistoryError> {
        let entries = self.entries.lock().map_err(|_| HistoryError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), HistoryError> {
        let mut entries = self.entries.lock().map_err(|_| HistoryError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One saved snapshot in the ring.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub pointer: usize,
    pub json: String,
    pub timestamp: String,
}

/// Circular log of saved snapshots.
///
/// Holds at most `capacity` entries; a save past capacity silently
/// overwrites the oldest slot.
pub struct History<S> {
    store: S,
    namespace: String,
    capacity: usize,
}

impl<S: KeyValueStore> History<S> {
    pub fn new(store: S, namespace: impl Into<String>, capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be positive");
        Self {
            store,
            namespace: namespace.into(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn key(&self, suffix: &str) -> String {
        format!("{}History_{}", self.namespace, suffix)
    }

    /// Pointer to the most recently written slot (0 before any save).
    pub fn newest(&self) -> Result<usize, HistoryError> {
        let stored = self.store.get(&self.key("newest"))?;
        Ok(stored
            .and_then(|v| v.parse::<i64>().ok())
            .map(|p| wrap_index(p, self.capacity))
            .unwrap_or(0))
    }

    /// Save a snapshot into the next slot, overwriting whatever was
    /// there. Returns the slot written.
    pub fn save(&self, json: &str) -> Result<usize, HistoryError> {
        let pointer = wrap_index(self.newest()? as i64 + 1, self.capacity);
        self.store.set(&self.key("newest"), &pointer.to_string())?;
        self.store.set(&self.key(&format!("json_{pointer}")), json)?;
        self.store.set(
            &self.key(&format!("timestamp_{pointer}")),
            &chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        )?;
        tracing::debug!(namespace = %self.namespace, pointer, "Saved history snapshot");
        Ok(pointer)
    }

    /// Load the snapshot in a slot. Out-of-range pointers wrap; an empty
    /// slot is `Ok(None)`, not an error.
    pub fn load(&self, pointer: i64) -> Result<Option<String>, HistoryError> {
        let pointer = wrap_index(pointer, self.capacity);
        self.store.get(&self.key(&format!("json_{pointer}")))
    }

    /// All stored entries, newest first.
    ///
    /// Walks backward from the newest slot and stops at the first slot
    /// without a timestamp; the ring fills monotonically from empty, so
    /// a hole means "not yet written", not corruption.
    pub fn list_most_recent_first(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let mut entries = Vec::new();
        let mut pointer = self.newest()? as i64;

        for _ in 0..self.capacity {
            let slot = wrap_index(pointer, self.capacity);
            let Some(timestamp) = self.store.get(&self.key(&format!("timestamp_{slot}")))? else {
                break;
            };
            let json = self
                .store
                .get(&self.key(&format!("json_{slot}")))?
                .unwrap_or_default();
            entries.push(HistoryEntry {
                pointer: slot,
                json,
                timestamp,
            });
            pointer -= 1;
        }

        Ok(entries)
    }
}

impl<S: KeyValueStore> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, HistoryError> {
        (*self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), HistoryError> {
        (*self).set(key, value)
    }
}
