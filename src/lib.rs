pub mod config;
pub mod data;
pub mod editor;
pub mod history;
pub mod store;
pub mod timeline;
pub mod util;
pub mod web;

pub use config::Config;
pub use data::Database;
pub use editor::{Editor, EditorConfig, EditorError};
pub use history::{History, HistoryEntry, HistoryError, KeyValueStore, MemoryStore};
pub use store::{FileStore, RemoteStore, RemoteStoreError};
pub use timeline::{flatten, from_json, to_json, to_tsv, FlatTimeline, IntervalRecord, TimelineError};
pub use util::{sanitize_snapshot_name, wrap_index, zero_filled};
