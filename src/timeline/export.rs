//! Timeline serialization: tab-separated export and the JSON structured form

use std::fmt::Write as _;

use super::{FlatTimeline, IntervalRecord, TimelineError};

/// Render a flattened timeline as tab-separated text.
///
/// Header row is `Time` followed by the column names in output order;
/// each data row starts with the real time value (`index / time_scale`)
/// followed by one sample per column. Rows are newline-terminated.
pub fn to_tsv(timeline: &FlatTimeline) -> String {
    let mut text = String::from("Time");
    for column in timeline.columns() {
        text.push('\t');
        text.push_str(&column.name);
    }
    text.push('\n');

    for i in 0..=timeline.end_index() {
        let _ = write!(text, "{}", i as f64 / timeline.time_scale);
        for column in timeline.columns() {
            let _ = write!(text, "\t{}", column.samples[i]);
        }
        text.push('\n');
    }

    text
}

/// Serialize the raw record sequence to the compact structured form
/// used for history snapshots.
pub fn to_json(records: &[IntervalRecord]) -> Result<String, TimelineError> {
    Ok(serde_json::to_string(records)?)
}

/// Parse a structured-form snapshot back into a record sequence.
pub fn from_json(json: &str) -> Result<Vec<IntervalRecord>, TimelineError> {
    Ok(serde_json::from_str(json)?)
}
