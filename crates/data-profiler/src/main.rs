//! CLI entry point for the dataset profiler.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use data_profiler::utils::truncate_str;
use data_profiler::{
    AnalyzerConfig, ColumnStats, DataProfiler, Dataset, FrameOptions, ProfileReport,
    QualityAnalyzer, ReportGenerator, load_dataframe,
};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Dataset profiling and quality scoring",
    long_about = "Profiles a CSV or Parquet file and rates its quality from 0 to 100.\n\n\
                  EXAMPLES:\n  \
                  # Profile a file and print a summary\n  \
                  data-profiler -i data.csv\n\n  \
                  # Machine-readable output\n  \
                  data-profiler -i data.csv --json | jq .quality.score\n\n  \
                  # Save a JSON report to results/data_profile.json\n  \
                  data-profiler -i data.csv --emit-report -o results/\n\n  \
                  # Custom weights and thresholds\n  \
                  data-profiler -i data.csv --config analyzer.json"
)]
struct Args {
    /// Path to the CSV or Parquet file to profile
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory for reports
    #[arg(short, long, default_value = "./outputs")]
    output: PathBuf,

    /// JSON file with analyzer weights and thresholds
    ///
    /// Fields left out keep their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Absolute correlation above which a column pair is reported
    #[arg(long)]
    correlation_threshold: Option<f64>,

    /// Treat strings such as "N/A", "null" or "missing" as missing values
    #[arg(long)]
    markers_as_missing: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all progress logs; only outputs the final JSON report.
    #[arg(long)]
    json: bool,

    /// Write a detailed JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_profile.json
    #[arg(short = 'r', long)]
    emit_report: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !args.input.exists() {
        return Err(anyhow!("Input file not found: {}", args.input.display()));
    }

    let config = load_config(&args)?;
    let analyzer = QualityAnalyzer::new(config)?;

    info!("Loading dataset from: {}", args.input.display());
    let df = load_dataframe(&args.input)?;
    let options = FrameOptions::default().with_error_markers_as_missing(args.markers_as_missing);
    let dataset = Dataset::from_dataframe(&df, options)?;

    let profile = DataProfiler::profile(&dataset, analyzer.config().correlation_threshold);
    let quality = analyzer
        .analyze(&dataset, &profile.summaries)
        .with_context(|| format!("Failed to analyze {}", args.input.display()))?;

    let input = args.input.display().to_string();
    let report = ReportGenerator::build_report(&input, &profile, &quality);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.emit_report {
        let generator = ReportGenerator::new(&args.output);
        let report_path = generator.write_report_to_file(&report, &extract_file_stem(&args.input))?;
        info!("Report written to: {}", report_path.display());
    }

    print_human_readable_summary(&report);

    Ok(())
}

/// Load the analyzer configuration and apply command-line overrides.
fn load_config(args: &Args) -> Result<AnalyzerConfig> {
    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };

    if let Some(threshold) = args.correlation_threshold {
        config.correlation_threshold = threshold;
    }

    Ok(config)
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Print a human-readable summary of the profile and quality report.
///
/// Uses `println!` rather than logging so the summary shows regardless of
/// log level.
fn print_human_readable_summary(report: &ProfileReport) {
    let profile = &report.dataset_profile;
    let quality = &report.quality;

    println!();
    println!("{}", "=".repeat(80));
    println!("DATASET PROFILE");
    println!("{}", "=".repeat(80));
    println!();

    println!(
        "Input: {} ({} rows x {} columns)",
        report.input_file, profile.rows, profile.columns
    );
    println!(
        "  Numeric columns: {}, categorical columns: {} ({} temporal)",
        profile.numeric_columns, profile.categorical_columns, profile.temporal_columns
    );
    println!(
        "  Missing cells: {} ({:.1}%)",
        profile.missing_cells, profile.missing_percentage
    );
    println!(
        "  Duplicate rows: {} ({:.1}%)",
        profile.duplicate_rows, profile.duplicate_percentage
    );
    println!();

    println!("COLUMNS");
    println!("{}", "-".repeat(40));
    println!(
        "{:<20} {:<12} {:<10} {:<12} {:<20}",
        "Column", "Kind", "Missing", "Mean/Unique", "Median/Top"
    );
    println!("{}", "-".repeat(76));
    for summary in &report.column_summaries {
        let (center, detail) = match &summary.stats {
            ColumnStats::Numeric(stats) => (
                stats.mean.map_or("-".to_string(), |m| format!("{:.3}", m)),
                stats.median.map_or("-".to_string(), |m| format!("{:.3}", m)),
            ),
            ColumnStats::Categorical(stats) => (
                stats.unique_count.to_string(),
                stats
                    .most_frequent
                    .as_deref()
                    .map_or("-".to_string(), |v| truncate_str(v, 19)),
            ),
        };
        println!(
            "{:<20} {:<12} {:<10} {:<12} {:<20}",
            truncate_str(&summary.name, 19),
            summary.kind().to_string(),
            summary.missing_count,
            center,
            detail
        );
    }
    println!();

    if !report.strong_correlations.is_empty() {
        println!("STRONG CORRELATIONS");
        println!("{}", "-".repeat(40));
        for pair in &report.strong_correlations {
            println!("  {} ~ {}: {:.3}", pair.first, pair.second, pair.coefficient);
        }
        println!();
    }

    println!("QUALITY");
    println!("{}", "-".repeat(40));
    println!("  Score: {:.1} / 100 ({})", quality.score, quality.tier);
    println!(
        "  Penalties: missing {:.1}, duplicates {:.1}, outliers {:.1}, empty columns {:.1}",
        quality.penalties.missing,
        quality.penalties.duplicate,
        quality.penalties.outlier,
        quality.penalties.all_missing
    );
    println!();

    if quality.issues.is_empty() {
        println!("  No data quality issues detected");
    } else {
        println!("Issues:");
        for issue in &quality.issues {
            println!("  - {}", issue);
        }
    }
    println!();

    if !quality.insights.is_empty() {
        println!("Insights:");
        for insight in &quality.insights {
            println!("  * {}", insight);
        }
        println!();
    }

    println!("Use --json for machine-readable output");
    println!("Use --emit-report to save detailed JSON report");
    println!("{}", "=".repeat(80));
}
