//! CLI argument parsing for Rockbreak

use crate::aggregate::GroupKey;
use crate::rank::RankMetric;
use crate::record::{Area, Location};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for analysis reports
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text tables (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

/// Crushing area selection
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AreaArg {
    A,
    B,
    /// Run both area pipelines concurrently
    Both,
}

/// Checkpoint location filter
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LocationArg {
    Grizzly,
    Crusher,
}

impl From<LocationArg> for Location {
    fn from(arg: LocationArg) -> Self {
        match arg {
            LocationArg::Grizzly => Location::Grizzly,
            LocationArg::Crusher => Location::Crusher,
        }
    }
}

/// Grouping key for the aggregation stage
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GroupByArg {
    /// Group by checkpoint location (Grizzly / Crusher)
    Location,
    /// Group by the matched delivery's source zone
    Zone,
}

impl From<GroupByArg> for GroupKey {
    fn from(arg: GroupByArg) -> Self {
        match arg {
            GroupByArg::Location => GroupKey::Location,
            GroupByArg::Zone => GroupKey::SourceZone,
        }
    }
}

/// Metric the category ranking orders by
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RankByArg {
    TotalDuration,
    MeanDuration,
    RockyRatio,
    MassRatio,
}

impl From<RankByArg> for RankMetric {
    fn from(arg: RankByArg) -> Self {
        match arg {
            RankByArg::TotalDuration => RankMetric::TotalDuration,
            RankByArg::MeanDuration => RankMetric::MeanDuration,
            RankByArg::RockyRatio => RankMetric::MeanRockyRatio,
            RankByArg::MassRatio => RankMetric::MassPerDuration,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "rockbreak")]
#[command(version)]
#[command(about = "Correlate truck deliveries with rockbreaker downtime", long_about = None)]
pub struct Cli {
    /// Directory holding A_DATA.csv, B_DATA.csv and RB_DATA.csv
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: PathBuf,

    /// Crushing area(s) to analyze
    #[arg(long, value_enum, default_value = "both")]
    pub area: AreaArg,

    /// Restrict to a single checkpoint location
    #[arg(long, value_enum)]
    pub location: Option<LocationArg>,

    /// Inclusive study-period start (e.g. "2024-07-24 06:00:00")
    #[arg(long = "from", value_name = "TIMESTAMP")]
    pub window_start: Option<String>,

    /// Inclusive study-period end
    #[arg(long = "to", value_name = "TIMESTAMP")]
    pub window_end: Option<String>,

    /// Categorical key for the grouped metrics
    #[arg(long = "group-by", value_enum, default_value = "location")]
    pub group_by: GroupByArg,

    /// Metric to rank categories by (descending)
    #[arg(long = "rank-by", value_enum, default_value = "total-duration")]
    pub rank_by: RankByArg,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug tracing to stderr
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Areas to run, in fixed A-then-B order
    pub fn areas(&self) -> Vec<Area> {
        match self.area {
            AreaArg::A => vec![Area::A],
            AreaArg::B => vec![Area::B],
            AreaArg::Both => vec![Area::A, Area::B],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["rockbreak", "--data-dir", "/tmp/data"]);
        assert!(matches!(cli.area, AreaArg::Both));
        assert!(matches!(cli.group_by, GroupByArg::Location));
        assert!(matches!(cli.format, OutputFormat::Text));
        assert!(cli.location.is_none());
        assert_eq!(cli.areas(), vec![Area::A, Area::B]);
    }

    #[test]
    fn test_cli_full_invocation() {
        let cli = Cli::parse_from([
            "rockbreak",
            "--data-dir",
            "/data",
            "--area",
            "a",
            "--location",
            "grizzly",
            "--from",
            "2024-07-24 06:00:00",
            "--to",
            "2024-07-31 06:00:00",
            "--group-by",
            "zone",
            "--rank-by",
            "mass-ratio",
            "--format",
            "json",
        ]);
        assert_eq!(cli.areas(), vec![Area::A]);
        assert!(matches!(cli.location, Some(LocationArg::Grizzly)));
        assert!(matches!(cli.group_by, GroupByArg::Zone));
        assert!(matches!(cli.rank_by, RankByArg::MassRatio));
        assert_eq!(cli.window_start.as_deref(), Some("2024-07-24 06:00:00"));
    }

    #[test]
    fn test_arg_conversions() {
        assert_eq!(GroupKey::from(GroupByArg::Zone), GroupKey::SourceZone);
        assert_eq!(Location::from(LocationArg::Crusher), Location::Crusher);
        assert_eq!(
            RankMetric::from(RankByArg::TotalDuration),
            RankMetric::TotalDuration
        );
    }
}
