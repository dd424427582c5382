//! Descriptive statistics over event durations
//!
//! Exploration-stage summary of how long rockbreaking stoppages run, used by
//! the text report next to the grouped aggregates. Basic moments go through
//! Trueno's SIMD vector ops; percentiles use linear interpolation over the
//! sorted sample.

use trueno::Vector;

/// Summary statistics for a set of event durations (minutes)
#[derive(Debug, Clone, PartialEq)]
pub struct DurationSummary {
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

/// Linear-interpolated percentile over pre-sorted data
fn percentile(sorted: &[f32], pct: f32) -> f32 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let index = (pct / 100.0) * (sorted.len() - 1) as f32;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted[lower]
    } else {
        let weight = index - lower as f32;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}

/// Compute the duration summary, or `None` for an empty sample
pub fn duration_summary(durations_minutes: &[f64]) -> Option<DurationSummary> {
    if durations_minutes.is_empty() {
        return None;
    }

    let samples: Vec<f32> = durations_minutes.iter().map(|&d| d as f32).collect();
    let v = Vector::from_slice(&samples);

    let mut sorted = samples.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Some(DurationSummary {
        count: samples.len(),
        mean: v.mean().unwrap_or(0.0),
        stddev: v.stddev().unwrap_or(0.0),
        min: v.min().unwrap_or(0.0),
        max: v.max().unwrap_or(0.0),
        median: percentile(&sorted, 50.0),
        p75: percentile(&sorted, 75.0),
        p90: percentile(&sorted, 90.0),
        p95: percentile(&sorted, 95.0),
    })
}
