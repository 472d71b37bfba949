//! Editor facade composing the flattening engine, local history, and
//! the remote store client
//!
//! The browser original subclassed a base editor per deployment; here a
//! deployment is just an [`EditorConfig`] handed to [`Editor::new`].

use crate::history::{History, HistoryError, KeyValueStore};
use crate::store::{RemoteStore, RemoteStoreError};
use crate::timeline::{
    self, flatten, FlatTimeline, IntervalRecord, TimelineError,
};

/// Error type for editor operations.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error(transparent)]
    Timeline(#[from] TimelineError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    RemoteStore(#[from] RemoteStoreError),
}

/// Per-deployment editor configuration.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Storage namespace prefix for history keys.
    pub name: String,
    /// Samples per source time unit; must be positive.
    pub time_scale: f64,
    /// Columns always present in built timelines, in output order.
    pub required_columns: Vec<String>,
    /// Ring buffer capacity; must be positive.
    pub history_capacity: usize,
    /// Structured-form snapshot loaded on reset and on malformed input.
    pub default_snapshot: String,
    /// Structured-form snapshot behind the "load example" action.
    pub example_snapshot: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            name: "timeline".to_string(),
            time_scale: 1.0,
            required_columns: Vec::new(),
            history_capacity: 5,
            default_snapshot: r#"[{"name":"EndTime","start":""}]"#.to_string(),
            example_snapshot: r#"[{"name":"EndTime","start":""}]"#.to_string(),
        }
    }
}

/// The editor: current record sequence plus snapshot history.
pub struct Editor<S> {
    config: EditorConfig,
    history: History<S>,
    records: Vec<IntervalRecord>,
}

impl<S: KeyValueStore> Editor<S> {
    /// Create an editor over the given key/value store, loading the
    /// configured default snapshot.
    pub fn new(config: EditorConfig, store: S) -> Self {
        let history = History::new(store, config.name.clone(), config.history_capacity);
        let records = timeline::from_json(&config.default_snapshot).unwrap_or_default();
        Self {
            config,
            history,
            records,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Current record sequence.
    pub fn records(&self) -> &[IntervalRecord] {
        &self.records
    }

    pub fn set_records(&mut self, records: Vec<IntervalRecord>) {
        self.records = records;
    }

    /// Replace the working records with a parsed snapshot.
    ///
    /// A malformed snapshot is never fatal: the editor falls back to the
    /// configured default and reports the parse error so the caller can
    /// notify the user.
    pub fn load_snapshot(&mut self, json: &str) -> Result<(), TimelineError> {
        match timeline::from_json(json) {
            Ok(records) => {
                self.records = records;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Malformed snapshot, falling back to default");
                self.records =
                    timeline::from_json(&self.config.default_snapshot).unwrap_or_default();
                Err(e)
            }
        }
    }

    /// Reset the working records to the configured default.
    pub fn reset(&mut self) {
        self.records = timeline::from_json(&self.config.default_snapshot).unwrap_or_default();
    }

    /// Load the configured example snapshot.
    pub fn load_example(&mut self) {
        self.records = timeline::from_json(&self.config.example_snapshot).unwrap_or_default();
    }

    /// Flatten the current records.
    pub fn build(&self) -> Result<FlatTimeline, TimelineError> {
        flatten(
            &self.records,
            self.config.time_scale,
            &self.config.required_columns,
        )
    }

    /// Tab-separated export of the current records, or the error
    /// message string when the timeline cannot be built.
    pub fn build_tsv(&self) -> String {
        match self.build() {
            Ok(flat) => timeline::to_tsv(&flat),
            Err(e) => e.to_string(),
        }
    }

    /// Save the current records into the history ring.
    ///
    /// Refused when the timeline cannot be built (no valid end marker);
    /// nothing is written in that case. Returns the slot written.
    pub fn save(&self) -> Result<usize, EditorError> {
        let flat = self.build()?;
        let json = timeline::to_json(&flat.raw)?;
        Ok(self.history.save(&json)?)
    }

    pub fn history(&self) -> &History<S> {
        &self.history
    }

    /// Load a local history slot into the working records.
    ///
    /// An empty slot is a no-op; returns whether anything was loaded.
    pub fn load_history(&mut self, pointer: i64) -> Result<bool, EditorError> {
        match self.history.load(pointer)? {
            Some(json) => {
                // History entries were validated on save; a parse error
                // here still falls back to the default snapshot.
                let _ = self.load_snapshot(&json);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Push a local history slot to the remote store under `name`.
    pub async fn push_history_entry(
        &self,
        remote: &RemoteStore,
        pointer: i64,
        name: &str,
    ) -> Result<bool, EditorError> {
        match self.history.load(pointer)? {
            Some(json) => {
                remote.save(name, &json).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Replace the working records with a snapshot from the remote
    /// store. On any failure the current records are left untouched.
    pub async fn load_remote(
        &mut self,
        remote: &RemoteStore,
        name: &str,
    ) -> Result<(), EditorError> {
        let data = remote.load(name).await?;
        let records = timeline::from_json(&data)?;
        self.records = records;
        Ok(())
    }
}
