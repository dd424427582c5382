//! Type and unit normalization for the raw tables
//!
//! Converts textual timestamps into `NaiveDateTime`, rescales event lengths
//! from seconds to minutes, and validates the schema (nonnegative mass,
//! rocky ratio in 1-5, well-ordered event intervals). Validation happens
//! here exactly once; downstream stages assume typed, checked records.
//!
//! Policy: fail-fast. The first malformed row aborts the whole batch with
//! the row index, column, and offending value in the error. Both outputs are
//! sorted ascending by their time field, which the as-of correlator
//! requires; the sort is stable, so rows sharing a timestamp keep their
//! input order.

use crate::error::{AnalysisError, Result};
use crate::record::{
    Area, DeliveryRecord, DowntimeEvent, Location, RawDeliveryRow, RawDowntimeRow,
};
use chrono::NaiveDateTime;
use tracing::debug;

/// Accepted timestamp layouts: `2024-07-24 06:00:00` with optional
/// fractional seconds, and the `T`-separated variant
const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a textual timestamp, trying each accepted layout in order
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Convert an event length from seconds to minutes, rounded to 3 decimal
/// places: `[60, 120, 409]` seconds become `[1.0, 2.0, 6.817]` minutes
pub fn seconds_to_minutes(seconds: f64) -> f64 {
    (seconds / 60.0 * 1000.0).round() / 1000.0
}

fn parse_error(row: usize, column: &'static str, value: &str, reason: &str) -> AnalysisError {
    AnalysisError::Parse {
        row,
        column,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn timestamp_field(row: usize, column: &'static str, value: &str) -> Result<NaiveDateTime> {
    parse_timestamp(value).ok_or_else(|| {
        parse_error(
            row,
            column,
            value,
            "expected a timestamp like 2024-07-24 06:00:00",
        )
    })
}

fn numeric_field(row: usize, column: &'static str, value: &str) -> Result<f64> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| parse_error(row, column, value, "expected a number"))?;
    if !parsed.is_finite() {
        return Err(parse_error(row, column, value, "number is not finite"));
    }
    Ok(parsed)
}

/// Normalize a raw delivery table into typed records
///
/// Validates mass >= 0 and rocky ratio in 1-5. Output is sorted ascending by
/// `timestamp`.
pub fn normalize_deliveries(rows: &[RawDeliveryRow]) -> Result<Vec<DeliveryRecord>> {
    let mut records = Vec::with_capacity(rows.len());

    for (row, raw) in rows.iter().enumerate() {
        let timestamp = timestamp_field(row, "TIP_DATETIME", &raw.tip_datetime)?;

        let mass = numeric_field(row, "MASS", &raw.mass)?;
        if mass < 0.0 {
            return Err(parse_error(row, "MASS", &raw.mass, "mass must be nonnegative"));
        }

        let rocky_ratio: u8 = raw
            .rocky_ratio
            .trim()
            .parse()
            .map_err(|_| parse_error(row, "ROCKY_RATIO", &raw.rocky_ratio, "expected an integer"))?;
        if !(1..=5).contains(&rocky_ratio) {
            return Err(parse_error(
                row,
                "ROCKY_RATIO",
                &raw.rocky_ratio,
                "rocky ratio must be between 1 and 5",
            ));
        }

        records.push(DeliveryRecord {
            timestamp,
            source_zone: raw.origin.trim().to_string(),
            mass,
            carrier_id: raw.truck_id.trim().to_string(),
            rocky_ratio,
        });
    }

    records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    debug!(rows = records.len(), "normalized delivery table");
    Ok(records)
}

/// Normalize a raw downtime table into typed events
///
/// Converts `LENGTH` seconds to minutes, validates `end >= start` and
/// duration > 0. Output is sorted ascending by `start_time`.
pub fn normalize_downtime(rows: &[RawDowntimeRow]) -> Result<Vec<DowntimeEvent>> {
    let mut events = Vec::with_capacity(rows.len());

    for (row, raw) in rows.iter().enumerate() {
        let area = Area::from_label(&raw.area)
            .ok_or_else(|| parse_error(row, "AREA", &raw.area, "unknown crushing area"))?;
        let location = Location::from_label(&raw.location)
            .ok_or_else(|| parse_error(row, "LOCATION", &raw.location, "unknown checkpoint"))?;

        let start_time = timestamp_field(row, "EVENT_START", &raw.event_start)?;
        let end_time = timestamp_field(row, "EVENT_END", &raw.event_end)?;
        if end_time < start_time {
            return Err(parse_error(
                row,
                "EVENT_END",
                &raw.event_end,
                "event ends before it starts",
            ));
        }

        let length_seconds = numeric_field(row, "LENGTH", &raw.length)?;
        if length_seconds <= 0.0 {
            return Err(parse_error(
                row,
                "LENGTH",
                &raw.length,
                "event length must be positive",
            ));
        }

        events.push(DowntimeEvent {
            area,
            location,
            start_time,
            end_time,
            duration_minutes: seconds_to_minutes(length_seconds),
        });
    }

    events.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    debug!(rows = events.len(), "normalized downtime table");
    Ok(events)
}
