//! Stage composition for one area's analysis, and the two-area fan-out
//!
//! Each area runs the strict chain normalize -> partition -> correlate ->
//! window -> aggregate -> rank over immutable inputs. The correlator needs
//! the complete sorted input, so no stage starts before its predecessor
//! finishes. The A and B pipelines share no state and run on scoped threads.

use crate::aggregate::{self, AggregateReport, GroupKey};
use crate::asof;
use crate::error::Result;
use crate::normalize;
use crate::partition;
use crate::rank::{self, RankMetric};
use crate::record::{Area, CorrelatedEvent, Location, RawDeliveryRow, RawDowntimeRow};
use crate::summary::{self, DurationSummary};
use crate::window;
use chrono::NaiveDateTime;
use tracing::info;

/// Parameters for one analysis run
#[derive(Debug, Clone)]
pub struct AnalysisParams {
    pub area: Area,
    /// Narrow to a single checkpoint, or analyze both
    pub location: Option<Location>,
    /// Inclusive study period over event start times
    pub window: Option<(NaiveDateTime, NaiveDateTime)>,
    pub group_key: GroupKey,
    pub rank_metric: RankMetric,
}

/// Everything one area's pipeline produces
#[derive(Debug, Clone)]
pub struct AreaAnalysis {
    pub area: Area,
    /// Correlated events after partitioning and windowing
    pub events: Vec<CorrelatedEvent>,
    pub report: AggregateReport,
    /// Category labels in presentation order
    pub ranking: Vec<String>,
    pub durations: Option<DurationSummary>,
}

/// Run the full chain for one area
pub fn analyze_area(
    downtime: &[RawDowntimeRow],
    deliveries: &[RawDeliveryRow],
    params: &AnalysisParams,
) -> Result<AreaAnalysis> {
    let all_events = normalize::normalize_downtime(downtime)?;
    let records = normalize::normalize_deliveries(deliveries)?;

    let subset = partition::partition(&all_events, params.area, params.location);
    let correlated = asof::asof_correlate(&subset, &records)?;

    let windowed = match params.window {
        Some((start, end)) => window::window(&correlated, start, end)?,
        None => correlated,
    };

    let report = aggregate::aggregate(&windowed, params.group_key);
    let ranking = rank::rank(&report.rows, params.rank_metric);

    let durations: Vec<f64> = windowed.iter().map(|c| c.event.duration_minutes).collect();
    let durations = summary::duration_summary(&durations);

    info!(
        area = %params.area,
        events = windowed.len(),
        groups = report.rows.len(),
        "area analysis complete"
    );

    Ok(AreaAnalysis {
        area: params.area,
        events: windowed,
        report,
        ranking,
        durations,
    })
}

/// Analyze areas A and B concurrently
///
/// The two pipelines read disjoint delivery tables and independent subsets
/// of the downtime table, so they run on scoped threads with no
/// synchronization. Results are identical to two sequential `analyze_area`
/// calls.
pub fn analyze_both_areas(
    downtime: &[RawDowntimeRow],
    deliveries_a: &[RawDeliveryRow],
    deliveries_b: &[RawDeliveryRow],
    params: &AnalysisParams,
) -> Result<(AreaAnalysis, AreaAnalysis)> {
    let params_a = AnalysisParams {
        area: Area::A,
        ..params.clone()
    };
    let params_b = AnalysisParams {
        area: Area::B,
        ..params.clone()
    };

    let (result_a, result_b) = crossbeam::thread::scope(|s| {
        let handle_a = s.spawn(|_| analyze_area(downtime, deliveries_a, &params_a));
        let handle_b = s.spawn(|_| analyze_area(downtime, deliveries_b, &params_b));
        (
            handle_a.join().expect("area A worker panicked"),
            handle_b.join().expect("area B worker panicked"),
        )
    })
    .expect("analysis scope panicked");

    Ok((result_a?, result_b?))
}
