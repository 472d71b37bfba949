//! Interval-to-timeline flattening

use crate::util::zero_filled;

use super::{IntervalRecord, TimelineError};

/// One named column of per-time-unit samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub samples: Vec<f64>,
}

/// Dense per-time-unit timeline built from a record sequence.
///
/// Columns keep a stable order: required columns first, then remaining
/// columns in first-seen order. Every column has `end_index() + 1`
/// samples. The original record sequence is retained in `raw` so the
/// timeline can be re-edited.
#[derive(Debug, Clone)]
pub struct FlatTimeline {
    /// Total timeline length in source time units.
    pub end_time: f64,
    /// Samples per source time unit.
    pub time_scale: f64,
    /// The record sequence the timeline was built from.
    pub raw: Vec<IntervalRecord>,
    columns: Vec<Column>,
}

impl FlatTimeline {
    /// Index of the last sample, `floor(end_time * time_scale)`.
    pub fn end_index(&self) -> usize {
        (self.end_time * self.time_scale) as usize
    }

    /// Columns in output order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Samples for a single column, if present.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.samples.as_slice())
    }
}

/// Flatten an ordered record sequence into per-time-unit columns.
///
/// `time_scale` converts source time units into sample indices (scale 2
/// means half-unit samples). Required columns are always present, zero
/// filled when no record touches them. Records write their `amount` into
/// every index of their span; later records overwrite earlier ones
/// index-by-index, so bars lower in the editor take priority.
///
/// Fails with [`TimelineError::InvalidEndTime`] when no end marker is
/// found or its `start` is not a non-negative number.
pub fn flatten(
    records: &[IntervalRecord],
    time_scale: f64,
    required_columns: &[String],
) -> Result<FlatTimeline, TimelineError> {
    let end_time = records
        .iter()
        .find(|r| r.is_end_marker())
        .and_then(|r| r.start_value())
        .filter(|t| *t >= 0.0)
        .ok_or(TimelineError::InvalidEndTime)?;

    let end_index = (end_time * time_scale) as i64;
    let len = end_index as usize + 1;

    let mut columns: Vec<Column> = required_columns
        .iter()
        .map(|name| Column {
            name: name.clone(),
            samples: zero_filled(len),
        })
        .collect();

    for record in records {
        if record.name.is_empty() || record.is_end_marker() {
            continue;
        }

        let slot = match columns.iter().position(|c| c.name == record.name) {
            Some(i) => i,
            None => {
                columns.push(Column {
                    name: record.name.clone(),
                    samples: zero_filled(len),
                });
                columns.len() - 1
            }
        };
        let column = &mut columns[slot];

        // A record with an unparsable bound or amount contributes no
        // writes; its column stays (zero filled unless others write it).
        let (Some(start), Some(stop)) = (record.start_value(), record.stop_value()) else {
            continue;
        };
        let Some(amount) = record.amount_value() else {
            continue;
        };

        let first = (start * time_scale).trunc() as i64;
        let last = ((stop * time_scale).trunc() as i64).min(end_index);
        // stop < start yields an empty range; indices below zero are
        // clamped away rather than treated as errors.
        for i in first.max(0)..=last {
            column.samples[i as usize] = amount;
        }
    }

    Ok(FlatTimeline {
        end_time,
        time_scale,
        raw: records.to_vec(),
        columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn end(at: f64) -> IntervalRecord {
        IntervalRecord::end_marker(at)
    }

    fn rec(name: &str, start: &str, stop: &str, amount: &str) -> IntervalRecord {
        IntervalRecord::new(name, start, stop, amount)
    }

    fn required(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_record_fills_span() {
        let records = vec![rec("A", "0", "2", "5"), end(2.0)];
        let timeline = flatten(&records, 1.0, &required(&["A"])).unwrap();
        assert_eq!(timeline.column("A").unwrap(), &[5.0, 5.0, 5.0]);
        assert_eq!(timeline.end_time, 2.0);
        assert_eq!(timeline.raw, records);
    }

    #[test]
    fn test_later_record_wins_on_overlap() {
        let records = vec![
            rec("A", "0", "3", "1"),
            rec("A", "1", "2", "9"),
            end(3.0),
        ];
        let timeline = flatten(&records, 1.0, &required(&["A"])).unwrap();
        assert_eq!(timeline.column("A").unwrap(), &[1.0, 9.0, 9.0, 1.0]);
    }

    #[test]
    fn test_required_columns_default_to_zero() {
        let records = vec![rec("B", "0", "1", "7"), end(1.0)];
        let timeline = flatten(&records, 1.0, &required(&["A", "B"])).unwrap();
        assert_eq!(timeline.column("A").unwrap(), &[0.0, 0.0]);
        assert_eq!(timeline.column("B").unwrap(), &[7.0, 7.0]);
    }

    #[test]
    fn test_column_order_required_first_then_first_seen() {
        let records = vec![
            rec("Z", "0", "0", "1"),
            rec("Q", "0", "0", "2"),
            end(0.0),
        ];
        let timeline = flatten(&records, 1.0, &required(&["A", "B"])).unwrap();
        let names: Vec<&str> = timeline.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "Z", "Q"]);
    }

    #[test]
    fn test_all_columns_share_length() {
        let records = vec![
            rec("A", "0", "10", "1"),
            rec("B", "3", "4", "2"),
            end(4.5),
        ];
        let timeline = flatten(&records, 2.0, &required(&["A"])).unwrap();
        let expected = (4.5f64 * 2.0) as usize + 1;
        for column in timeline.columns() {
            assert_eq!(column.samples.len(), expected);
        }
    }

    #[test]
    fn test_time_scale_maps_units_to_indices() {
        // scale 2: one sample per half time unit
        let records = vec![rec("A", "1", "2", "3"), end(3.0)];
        let timeline = flatten(&records, 2.0, &required(&["A"])).unwrap();
        assert_eq!(
            timeline.column("A").unwrap(),
            &[0.0, 0.0, 3.0, 3.0, 3.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_stop_clamped_to_end_index() {
        let records = vec![rec("A", "1", "99", "2"), end(2.0)];
        let timeline = flatten(&records, 1.0, &required(&["A"])).unwrap();
        assert_eq!(timeline.column("A").unwrap(), &[0.0, 2.0, 2.0]);
    }

    #[test]
    fn test_stop_before_start_writes_nothing() {
        let records = vec![rec("A", "2", "1", "5"), end(3.0)];
        let timeline = flatten(&records, 1.0, &required(&["A"])).unwrap();
        assert_eq!(timeline.column("A").unwrap(), &[0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_negative_start_clamped_to_zero() {
        let records = vec![rec("A", "-2", "1", "5"), end(2.0)];
        let timeline = flatten(&records, 1.0, &required(&["A"])).unwrap();
        assert_eq!(timeline.column("A").unwrap(), &[5.0, 5.0, 0.0]);
    }

    #[test]
    fn test_unparsable_amount_skips_writes_but_keeps_column() {
        let records = vec![rec("A", "0", "2", "oops"), end(2.0)];
        let timeline = flatten(&records, 1.0, &[]).unwrap();
        assert_eq!(timeline.column("A").unwrap(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_unparsable_bounds_skip_writes() {
        let records = vec![rec("A", "", "2", "5"), rec("A", "0", "", "5"), end(2.0)];
        let timeline = flatten(&records, 1.0, &[]).unwrap();
        assert_eq!(timeline.column("A").unwrap(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_unnamed_records_skipped() {
        let records = vec![
            IntervalRecord {
                wildcard: true,
                ..Default::default()
            },
            end(1.0),
        ];
        let timeline = flatten(&records, 1.0, &[]).unwrap();
        assert_eq!(timeline.columns().len(), 0);
    }

    #[test]
    fn test_missing_end_marker_is_error() {
        let records = vec![rec("A", "0", "1", "5")];
        let err = flatten(&records, 1.0, &[]).unwrap_err();
        assert!(matches!(err, TimelineError::InvalidEndTime));
    }

    #[test]
    fn test_non_numeric_end_time_is_error() {
        let records = vec![IntervalRecord {
            name: IntervalRecord::END_MARKER.to_string(),
            start: Some("".to_string()),
            ..Default::default()
        }];
        let err = flatten(&records, 1.0, &[]).unwrap_err();
        assert!(matches!(err, TimelineError::InvalidEndTime));
    }

    #[test]
    fn test_negative_end_time_is_error() {
        let records = vec![end(-1.0)];
        let err = flatten(&records, 1.0, &[]).unwrap_err();
        assert!(matches!(err, TimelineError::InvalidEndTime));
    }

    #[test]
    fn test_end_time_zero_yields_single_sample() {
        let records = vec![rec("A", "0", "0", "4"), end(0.0)];
        let timeline = flatten(&records, 1.0, &[]).unwrap();
        assert_eq!(timeline.column("A").unwrap(), &[4.0]);
        assert_eq!(timeline.end_index(), 0);
    }
}
