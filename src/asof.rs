//! Backward as-of correlation of downtime events with deliveries
//!
//! For each downtime event, attaches the single most recent delivery whose
//! tip timestamp is at or before the event's start. This is a backward merge
//! over two pre-sorted sequences, not an equality join: the output always
//! has exactly one row per input event, whatever the delivery count.
//!
//! Both inputs must already be sorted ascending by their time field
//! (`normalize` guarantees this); unsorted input is rejected with a
//! `Precondition` error rather than silently re-sorted, since windowing and
//! aggregation downstream depend on the ordering for determinism.

use crate::error::{AnalysisError, Result};
use crate::record::{CorrelatedEvent, DeliveryRecord, DowntimeEvent};

fn ensure_sorted<T, K: Ord>(items: &[T], key: impl Fn(&T) -> K, input: &'static str) -> Result<()> {
    for (i, pair) in items.windows(2).enumerate() {
        if key(&pair[0]) > key(&pair[1]) {
            return Err(AnalysisError::Precondition { input, row: i + 1 });
        }
    }
    Ok(())
}

/// Attach to each event the most recent delivery with
/// `timestamp <= start_time`, or `None` when no delivery precedes it
///
/// Two-pointer merge, linear in `events.len() + records.len()`. When several
/// deliveries share the maximal qualifying timestamp, the one appearing last
/// in the sorted input wins (the merge cursor passes all of them and the
/// match is the record just behind it).
pub fn asof_correlate(
    events: &[DowntimeEvent],
    records: &[DeliveryRecord],
) -> Result<Vec<CorrelatedEvent>> {
    ensure_sorted(events, |e| e.start_time, "events")?;
    ensure_sorted(records, |r| r.timestamp, "deliveries")?;

    let mut correlated = Vec::with_capacity(events.len());
    let mut cursor = 0usize;

    for event in events {
        while cursor < records.len() && records[cursor].timestamp <= event.start_time {
            cursor += 1;
        }
        let delivery = if cursor == 0 {
            None
        } else {
            Some(records[cursor - 1].clone())
        };
        correlated.push(CorrelatedEvent {
            event: event.clone(),
            delivery,
        });
    }

    Ok(correlated)
}
