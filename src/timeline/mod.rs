//! Timeline flattening engine and snapshot serialization
//!
//! Converts an ordered sequence of named interval records into dense
//! per-time-unit column arrays, and serializes timelines two ways:
//! tab-separated text for export and a compact JSON "structured form"
//! for history snapshots.

mod export;
mod flatten;
mod record;

pub use export::{from_json, to_json, to_tsv};
pub use flatten::{flatten, Column, FlatTimeline};
pub use record::IntervalRecord;

/// Error type for timeline building and snapshot parsing.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    /// No valid end marker in the record sequence.
    #[error("EndTime must be a positive number.")]
    InvalidEndTime,

    /// Structured-form snapshot failed to parse.
    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(#[from] serde_json::Error),
}
