//! CSV table loading
//!
//! Reads the three input tables into raw string-typed rows, located by
//! header name so column order does not matter. All type interpretation
//! (timestamps, numbers, categories) happens later in `normalize`; this
//! layer only splits fields, honoring double-quoted values with `""`
//! escapes.

use crate::record::{RawDeliveryRow, RawDowntimeRow};
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Split one CSV line into fields, honoring quotes
fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

fn header_index(headers: &[String], name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .with_context(|| format!("missing required column {name:?}, found {headers:?}"))
}

fn field(fields: &[String], index: usize) -> String {
    fields.get(index).cloned().unwrap_or_default()
}

/// Parse delivery CSV text (`TIP_DATETIME`, `ORIGIN`, `MASS`, `TRUCK_ID`,
/// `ROCKY_RATIO`) into raw rows
pub fn parse_delivery_table(text: &str) -> Result<Vec<RawDeliveryRow>> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let Some(header_line) = lines.next() else {
        bail!("delivery table is empty");
    };
    let headers = split_line(header_line);

    let tip = header_index(&headers, "TIP_DATETIME")?;
    let origin = header_index(&headers, "ORIGIN")?;
    let mass = header_index(&headers, "MASS")?;
    let truck = header_index(&headers, "TRUCK_ID")?;
    let rocky = header_index(&headers, "ROCKY_RATIO")?;

    let rows = lines
        .map(|line| {
            let fields = split_line(line);
            RawDeliveryRow {
                tip_datetime: field(&fields, tip),
                origin: field(&fields, origin),
                mass: field(&fields, mass),
                truck_id: field(&fields, truck),
                rocky_ratio: field(&fields, rocky),
            }
        })
        .collect();
    Ok(rows)
}

/// Parse downtime CSV text (`AREA`, `LOCATION`, `EVENT_START`, `EVENT_END`,
/// `LENGTH`) into raw rows
pub fn parse_downtime_table(text: &str) -> Result<Vec<RawDowntimeRow>> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let Some(header_line) = lines.next() else {
        bail!("downtime table is empty");
    };
    let headers = split_line(header_line);

    let area = header_index(&headers, "AREA")?;
    let location = header_index(&headers, "LOCATION")?;
    let start = header_index(&headers, "EVENT_START")?;
    let end = header_index(&headers, "EVENT_END")?;
    let length = header_index(&headers, "LENGTH")?;

    let rows = lines
        .map(|line| {
            let fields = split_line(line);
            RawDowntimeRow {
                area: field(&fields, area),
                location: field(&fields, location),
                event_start: field(&fields, start),
                event_end: field(&fields, end),
                length: field(&fields, length),
            }
        })
        .collect();
    Ok(rows)
}

/// Load a delivery table from disk
pub fn load_delivery_table(path: &Path) -> Result<Vec<RawDeliveryRow>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let rows = parse_delivery_table(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    debug!(path = %path.display(), rows = rows.len(), "loaded delivery table");
    Ok(rows)
}

/// Load a downtime table from disk
pub fn load_downtime_table(path: &Path) -> Result<Vec<RawDowntimeRow>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let rows = parse_downtime_table(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    debug!(path = %path.display(), rows = rows.len(), "loaded downtime table");
    Ok(rows)
}
