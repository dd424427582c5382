//! JSON output for analysis results
//!
//! Serializable mirror of one area's analysis: aggregate rows, presentation
//! ranking, exclusion counts, and the duration summary. Timestamp-free by
//! design; the correlated event table exports through `csv_output`.

use crate::aggregate::{AggregateReport, AggregateRow};
use crate::pipeline::AreaAnalysis;
use crate::summary::DurationSummary;
use serde::{Deserialize, Serialize};

/// One category's aggregate metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonAggregateRow {
    pub label: String,
    pub events: usize,
    pub total_duration_min: f64,
    pub mean_duration_min: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_rocky_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mass_per_downtime: Option<f64>,
}

impl From<&AggregateRow> for JsonAggregateRow {
    fn from(row: &AggregateRow) -> Self {
        Self {
            label: row.label.clone(),
            events: row.event_count,
            total_duration_min: row.total_duration_minutes,
            mean_duration_min: row.mean_duration_minutes,
            mean_rocky_ratio: row.mean_rocky_ratio,
            mass_per_downtime: row.mass_per_duration,
        }
    }
}

/// Duration summary statistics (minutes)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonDurationSummary {
    pub count: usize,
    pub mean: f32,
    pub stddev: f32,
    pub min: f32,
    pub max: f32,
    pub median: f32,
    pub p75: f32,
    pub p90: f32,
    pub p95: f32,
}

impl From<&DurationSummary> for JsonDurationSummary {
    fn from(s: &DurationSummary) -> Self {
        Self {
            count: s.count,
            mean: s.mean,
            stddev: s.stddev,
            min: s.min,
            max: s.max,
            median: s.median,
            p75: s.p75,
            p90: s.p90,
            p95: s.p95,
        }
    }
}

/// Full analysis result for one area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonAnalysisReport {
    pub area: String,
    pub group_by: String,
    pub rows: Vec<JsonAggregateRow>,
    /// Category labels in presentation order
    pub ranking: Vec<String>,
    pub unmatched_events: usize,
    pub zero_duration_exclusions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub durations: Option<JsonDurationSummary>,
}

impl JsonAnalysisReport {
    /// Build the serializable report from one area's analysis
    pub fn from_analysis(analysis: &AreaAnalysis) -> Self {
        let report: &AggregateReport = &analysis.report;
        Self {
            area: analysis.area.to_string(),
            group_by: report.group_key.to_string(),
            rows: report.rows.iter().map(JsonAggregateRow::from).collect(),
            ranking: analysis.ranking.clone(),
            unmatched_events: report.unmatched_events,
            zero_duration_exclusions: report.zero_duration_exclusions,
            durations: analysis.durations.as_ref().map(JsonDurationSummary::from),
        }
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
