//! Area and checkpoint partitioning of the downtime table
//!
//! The downtime table mixes both crushing areas; each area's pipeline runs
//! on its own subset. Pure filter: an empty result is not an error.

use crate::record::{Area, DowntimeEvent, Location};
use tracing::warn;

/// Select the downtime events for one area, optionally narrowed to a single
/// checkpoint location
///
/// Preserves input order, so a sorted input stays sorted.
pub fn partition(
    events: &[DowntimeEvent],
    area: Area,
    location: Option<Location>,
) -> Vec<DowntimeEvent> {
    let subset: Vec<DowntimeEvent> = events
        .iter()
        .filter(|e| e.area == area && location.map_or(true, |loc| e.location == loc))
        .cloned()
        .collect();

    if subset.is_empty() && !events.is_empty() {
        warn!(%area, ?location, "partition produced no downtime events");
    }
    subset
}
