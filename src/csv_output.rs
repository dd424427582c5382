//! CSV output for aggregate reports and correlated event tables
//!
//! Machine-readable export consumed by spreadsheet tooling and the chart
//! layer. Numeric cells keep full precision; absent metrics render as empty
//! cells.

use crate::aggregate::AggregateReport;
use crate::record::CorrelatedEvent;

/// Escape a CSV field (handle commas, quotes, newlines)
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn optional_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Render an aggregate report as CSV, one row per category
pub fn report_to_csv(report: &AggregateReport) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{},events,total_duration_min,mean_duration_min,mean_rocky_ratio,mass_per_downtime\n",
        report.group_key
    ));

    for row in &report.rows {
        output.push_str(&format!(
            "{},{},{},{},{},{}\n",
            escape_field(&row.label),
            row.event_count,
            row.total_duration_minutes,
            row.mean_duration_minutes,
            optional_cell(row.mean_rocky_ratio),
            optional_cell(row.mass_per_duration),
        ));
    }
    output
}

/// Render correlated events as CSV, one row per downtime event with its
/// matched delivery fields (empty when unmatched)
pub fn events_to_csv(events: &[CorrelatedEvent]) -> String {
    let mut output = String::new();
    output.push_str(
        "area,location,event_start,event_end,duration_min,tip_datetime,origin,mass,truck_id,rocky_ratio\n",
    );

    for correlated in events {
        let e = &correlated.event;
        let delivery_cells = match &correlated.delivery {
            Some(d) => format!(
                "{},{},{},{},{}",
                d.timestamp,
                escape_field(&d.source_zone),
                d.mass,
                escape_field(&d.carrier_id),
                d.rocky_ratio
            ),
            None => ",,,,".to_string(),
        };
        output.push_str(&format!(
            "{},{},{},{},{},{}\n",
            e.area, e.location, e.start_time, e.end_time, e.duration_minutes, delivery_cells
        ));
    }
    output
}
