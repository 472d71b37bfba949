//! Interval record: one named timeline bar

use serde::{Deserialize, Deserializer, Serialize};

/// One user-entered timeline bar with inclusive start/stop bounds in
/// source time units and the value held during that span.
///
/// Field values are kept as the raw strings the editor produced so a
/// snapshot round-trips unchanged; numeric interpretation happens at
/// flatten time. A record named [`IntervalRecord::END_MARKER`] is the
/// sentinel carrying the total timeline length in `start`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntervalRecord {
    /// User-defined column, as opposed to one of the preset steps.
    #[serde(default, skip_serializing_if = "is_false")]
    pub wildcard: bool,

    #[serde(default)]
    pub name: String,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "scalar_as_string"
    )]
    pub start: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "scalar_as_string"
    )]
    pub stop: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "scalar_as_string"
    )]
    pub amount: Option<String>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Accepts either a JSON string or a bare number; snapshots written by
/// the editor carry strings, hand-edited ones sometimes carry numbers.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Number(f64),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|s| match s {
        Scalar::Text(t) => t,
        Scalar::Number(n) => format!("{}", n),
    }))
}

impl IntervalRecord {
    /// Sentinel record name marking the total timeline length.
    pub const END_MARKER: &'static str = "EndTime";

    /// Build a regular interval record from string fields.
    pub fn new(name: &str, start: &str, stop: &str, amount: &str) -> Self {
        Self {
            wildcard: false,
            name: name.to_string(),
            start: Some(start.to_string()),
            stop: Some(stop.to_string()),
            amount: Some(amount.to_string()),
        }
    }

    /// Build the end-marker sentinel.
    pub fn end_marker(end_time: f64) -> Self {
        Self {
            wildcard: false,
            name: Self::END_MARKER.to_string(),
            start: Some(format!("{}", end_time)),
            stop: None,
            amount: None,
        }
    }

    /// Whether this record is the end-marker sentinel.
    pub fn is_end_marker(&self) -> bool {
        self.name == Self::END_MARKER
    }

    pub fn start_value(&self) -> Option<f64> {
        parse_field(self.start.as_deref())
    }

    pub fn stop_value(&self) -> Option<f64> {
        parse_field(self.stop.as_deref())
    }

    pub fn amount_value(&self) -> Option<f64> {
        parse_field(self.amount.as_deref())
    }
}

/// Strict numeric field parse: trimmed full-string parse, finite only.
fn parse_field(field: Option<&str>) -> Option<f64> {
    field?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
