//! Category ranking for presentation order
//!
//! Orders category labels by a chosen aggregate metric, descending, so the
//! downstream renderer can fix its categorical axis. The sort is stable:
//! ties keep the aggregator's first-seen order, which makes the ordering
//! reproducible across runs.

use crate::aggregate::AggregateRow;
use std::cmp::Ordering;
use std::fmt;

/// Metric to rank categories by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankMetric {
    TotalDuration,
    MeanDuration,
    MeanRockyRatio,
    MassPerDuration,
}

impl fmt::Display for RankMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankMetric::TotalDuration => write!(f, "total_duration"),
            RankMetric::MeanDuration => write!(f, "mean_duration"),
            RankMetric::MeanRockyRatio => write!(f, "mean_rocky_ratio"),
            RankMetric::MassPerDuration => write!(f, "mass_per_duration"),
        }
    }
}

fn metric_value(row: &AggregateRow, metric: RankMetric) -> Option<f64> {
    match metric {
        RankMetric::TotalDuration => Some(row.total_duration_minutes),
        RankMetric::MeanDuration => Some(row.mean_duration_minutes),
        RankMetric::MeanRockyRatio => row.mean_rocky_ratio,
        RankMetric::MassPerDuration => row.mass_per_duration,
    }
}

/// Order category labels by `metric`, descending
///
/// Rows whose metric is absent (`None`) sort after every present value.
/// Output is a permutation of the input labels.
pub fn rank(rows: &[AggregateRow], metric: RankMetric) -> Vec<String> {
    let mut keyed: Vec<(&AggregateRow, f64)> = rows
        .iter()
        .map(|row| (row, metric_value(row, metric).unwrap_or(f64::NEG_INFINITY)))
        .collect();

    // Stable sort keeps insertion order for equal keys.
    keyed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    keyed.into_iter().map(|(row, _)| row.label.clone()).collect()
}
