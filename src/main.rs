use anyhow::{bail, Context, Result};
use clap::Parser;
use rockbreak::cli::{Cli, OutputFormat};
use rockbreak::pipeline::{analyze_area, analyze_both_areas, AnalysisParams, AreaAnalysis};
use rockbreak::record::Area;
use rockbreak::{csv_output, ingest, json_output, normalize};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn parse_window(cli: &Cli) -> Result<Option<(chrono::NaiveDateTime, chrono::NaiveDateTime)>> {
    match (&cli.window_start, &cli.window_end) {
        (None, None) => Ok(None),
        (Some(start), Some(end)) => {
            let start = normalize::parse_timestamp(start)
                .with_context(|| format!("invalid --from timestamp {start:?}"))?;
            let end = normalize::parse_timestamp(end)
                .with_context(|| format!("invalid --to timestamp {end:?}"))?;
            Ok(Some((start, end)))
        }
        _ => bail!("--from and --to must be given together"),
    }
}

fn print_text_report(analysis: &AreaAnalysis) {
    let report = &analysis.report;
    println!("=== Area {} - downtime by {} ===", analysis.area, report.group_key);
    println!(
        "{:<14} {:>7} {:>12} {:>11} {:>12} {:>14}",
        report.group_key.to_string(),
        "events",
        "total (min)",
        "mean (min)",
        "rocky ratio",
        "mass/downtime"
    );

    for row in &report.rows {
        let rocky = row
            .mean_rocky_ratio
            .map(|v| format!("{v:.2}"))
            .unwrap_or_default();
        let ratio = row
            .mass_per_duration
            .map(|v| format!("{v:.2}"))
            .unwrap_or_default();
        println!(
            "{:<14} {:>7} {:>12.3} {:>11.3} {:>12} {:>14}",
            row.label,
            row.event_count,
            row.total_duration_minutes,
            row.mean_duration_minutes,
            rocky,
            ratio
        );
    }

    if !analysis.ranking.is_empty() {
        println!("ranking: {}", analysis.ranking.join(" > "));
    }
    if report.unmatched_events > 0 || report.zero_duration_exclusions > 0 {
        println!(
            "excluded: {} unmatched event(s), {} zero-duration row(s)",
            report.unmatched_events, report.zero_duration_exclusions
        );
    }
    if let Some(s) = &analysis.durations {
        println!(
            "durations (min): n={} mean={:.3} stddev={:.3} min={:.3} median={:.3} p95={:.3} max={:.3}",
            s.count, s.mean, s.stddev, s.min, s.median, s.p95, s.max
        );
    }
    println!();
}

fn print_report(analysis: &AreaAnalysis, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text_report(analysis),
        OutputFormat::Json => {
            let report = json_output::JsonAnalysisReport::from_analysis(analysis);
            println!("{}", report.to_json()?);
        }
        OutputFormat::Csv => print!("{}", csv_output::report_to_csv(&analysis.report)),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let downtime = ingest::load_downtime_table(&cli.data_dir.join("RB_DATA.csv"))?;
    let window = parse_window(&cli)?;

    let params = AnalysisParams {
        area: Area::A,
        location: cli.location.map(Into::into),
        window,
        group_key: cli.group_by.into(),
        rank_metric: cli.rank_by.into(),
    };

    let areas = cli.areas();
    if areas.len() == 2 {
        let deliveries_a = ingest::load_delivery_table(&cli.data_dir.join("A_DATA.csv"))?;
        let deliveries_b = ingest::load_delivery_table(&cli.data_dir.join("B_DATA.csv"))?;
        let (analysis_a, analysis_b) =
            analyze_both_areas(&downtime, &deliveries_a, &deliveries_b, &params)?;
        print_report(&analysis_a, cli.format)?;
        print_report(&analysis_b, cli.format)?;
    } else {
        let area = areas[0];
        let file = match area {
            Area::A => "A_DATA.csv",
            Area::B => "B_DATA.csv",
        };
        let deliveries = ingest::load_delivery_table(&cli.data_dir.join(file))?;
        let analysis = analyze_area(&downtime, &deliveries, &AnalysisParams { area, ..params })?;
        print_report(&analysis, cli.format)?;
    }

    Ok(())
}
