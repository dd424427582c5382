//! Study-period window filter over correlated events
//!
//! Keeps events whose start time falls within `[start, end]`, inclusive on
//! both ends (an event starting exactly at either bound is kept; one second
//! past the upper bound is dropped). Pure filter: matched deliveries pass
//! through untouched and an empty result is not an error.

use crate::error::{AnalysisError, Result};
use crate::record::CorrelatedEvent;
use chrono::NaiveDateTime;
use tracing::warn;

/// Restrict correlated events to the inclusive interval `[start, end]`
///
/// Fails with `InvalidRange` when `start > end`. Applying the same window
/// twice is idempotent.
pub fn window(
    events: &[CorrelatedEvent],
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Vec<CorrelatedEvent>> {
    if start > end {
        return Err(AnalysisError::InvalidRange { start, end });
    }

    let kept: Vec<CorrelatedEvent> = events
        .iter()
        .filter(|c| c.event.start_time >= start && c.event.start_time <= end)
        .cloned()
        .collect();

    if kept.is_empty() && !events.is_empty() {
        warn!(%start, %end, "window excluded every event");
    }
    Ok(kept)
}
