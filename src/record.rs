//! Typed records for the delivery and downtime tables
//!
//! The raw tables arrive with every field as text; `normalize` converts them
//! into these fixed-schema records exactly once, so downstream stages never
//! re-validate.

use chrono::NaiveDateTime;
use std::fmt;

/// Primary crushing area where a downtime event was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    A,
    B,
}

impl Area {
    /// Parse an `AREA` label, either the full form ("Primary Crushing - A")
    /// or the bare letter
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Primary Crushing - A" | "A" | "a" => Some(Area::A),
            "Primary Crushing - B" | "B" | "b" => Some(Area::B),
            _ => None,
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Area::A => write!(f, "A"),
            Area::B => write!(f, "B"),
        }
    }
}

/// Checkpoint within a crushing area where the rockbreaker operated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Grizzly,
    Crusher,
}

impl Location {
    /// Parse a `LOCATION` label (case-insensitive)
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "grizzly" => Some(Location::Grizzly),
            "crusher" => Some(Location::Crusher),
            _ => None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Grizzly => write!(f, "Grizzly"),
            Location::Crusher => write!(f, "Crusher"),
        }
    }
}

/// Unparsed delivery row, fields exactly as read from the table
#[derive(Debug, Clone, Default)]
pub struct RawDeliveryRow {
    pub tip_datetime: String,
    pub origin: String,
    pub mass: String,
    pub truck_id: String,
    pub rocky_ratio: String,
}

/// Unparsed downtime row, fields exactly as read from the table
#[derive(Debug, Clone, Default)]
pub struct RawDowntimeRow {
    pub area: String,
    pub location: String,
    pub event_start: String,
    pub event_end: String,
    pub length: String,
}

/// One physical truck delivery, immutable once created
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryRecord {
    /// When the truck tipped its load onto the grizzly
    pub timestamp: NaiveDateTime,
    /// Zone the material was extracted from
    pub source_zone: String,
    /// Tonnes on the truck, nonnegative
    pub mass: f64,
    /// Unique truck identifier
    pub carrier_id: String,
    /// Ordinal 1-5 hardness estimate for the zone (1 = rockiest)
    pub rocky_ratio: u8,
}

/// One rockbreaking stoppage interval
///
/// Invariants enforced at normalization: `end_time >= start_time` and
/// `duration_minutes > 0`. The duration comes from the table's independent
/// `LENGTH` column (seconds), not from the interval endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct DowntimeEvent {
    pub area: Area,
    pub location: Location,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// Event length converted to minutes, rounded to 3 decimal places
    pub duration_minutes: f64,
}

/// A downtime event joined to the most recent delivery that preceded it
///
/// Many events may share one delivery; `delivery` is `None` when no delivery
/// is at or before the event's start.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelatedEvent {
    pub event: DowntimeEvent,
    pub delivery: Option<DeliveryRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_from_full_label() {
        assert_eq!(Area::from_label("Primary Crushing - A"), Some(Area::A));
        assert_eq!(Area::from_label("Primary Crushing - B"), Some(Area::B));
    }

    #[test]
    fn test_area_from_bare_letter() {
        assert_eq!(Area::from_label("A"), Some(Area::A));
        assert_eq!(Area::from_label(" b "), Some(Area::B));
    }

    #[test]
    fn test_area_rejects_unknown_label() {
        assert_eq!(Area::from_label("Primary Crushing - C"), None);
        assert_eq!(Area::from_label(""), None);
    }

    #[test]
    fn test_location_labels() {
        assert_eq!(Location::from_label("Grizzly"), Some(Location::Grizzly));
        assert_eq!(Location::from_label("crusher"), Some(Location::Crusher));
        assert_eq!(Location::from_label("Stockpile"), None);
    }

    #[test]
    fn test_display_round_trips_through_from_label() {
        for loc in [Location::Grizzly, Location::Crusher] {
            assert_eq!(Location::from_label(&loc.to_string()), Some(loc));
        }
        for area in [Area::A, Area::B] {
            assert_eq!(Area::from_label(&area.to_string()), Some(area));
        }
    }
}
