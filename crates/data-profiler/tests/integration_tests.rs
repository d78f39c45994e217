//! Integration tests for the dataset profiler.
//!
//! These tests load fixture files from disk and check the profile and quality
//! report end to end.

use data_profiler::{
    AnalyzerConfig, DataProfiler, Dataset, FrameOptions, InsightKind, IssueKind, ProfileReport,
    ProfilerError, QualityAnalyzer, QualityReport, QualityTier, ReportGenerator, Severity,
    load_dataframe,
};
use polars::prelude::{DataFrame, ParquetWriter, df};
use pretty_assertions::assert_eq;
use std::fs::File;
use std::path::PathBuf;
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_dataset(filename: &str, options: FrameOptions) -> Dataset {
    let df = load_dataframe(fixtures_path().join(filename)).expect("Failed to load fixture");
    Dataset::from_dataframe(&df, options).expect("Failed to convert fixture")
}

fn analyze(dataset: &Dataset) -> QualityReport {
    QualityAnalyzer::default()
        .analyze_dataset(dataset)
        .expect("Analysis should succeed")
}

// ============================================================================
// Clean Dataset Tests
// ============================================================================

#[test]
fn test_clean_dataset_is_excellent() {
    let dataset = load_dataset("clean.csv", FrameOptions::default());
    assert_eq!(dataset.shape(), (10, 4));

    let report = analyze(&dataset);
    assert_eq!(report.score, 100.0);
    assert_eq!(report.tier, QualityTier::Excellent);
    assert!(report.issues.is_empty());
    assert_eq!(report.insights.last().map(|i| i.kind), Some(InsightKind::NoIssues));
}

#[test]
fn test_clean_dataset_reports_correlation() {
    let dataset = load_dataset("clean.csv", FrameOptions::default());

    let profile = DataProfiler::profile(&dataset, 0.7);
    assert_eq!(profile.numeric_columns, 3);
    assert_eq!(profile.categorical_columns, 1);
    assert_eq!(profile.strong_correlations.len(), 1);
    assert_eq!(profile.strong_correlations[0].first, "age");
    assert_eq!(profile.strong_correlations[0].second, "income");

    let report = analyze(&dataset);
    let correlation = report
        .insights
        .iter()
        .find(|i| i.kind == InsightKind::StrongCorrelation)
        .expect("Expected a correlation insight");
    assert_eq!(correlation.columns, ["age", "income"]);
}

// ============================================================================
// Messy Dataset Tests
// ============================================================================

#[test]
fn test_messy_dataset_measurements() {
    let dataset = load_dataset("messy.csv", FrameOptions::default());
    let report = analyze(&dataset);

    assert_eq!(report.rows, 12);
    assert_eq!(report.columns, 5);
    assert_eq!(report.missing_cells, 3);
    assert_eq!(report.missing_percentage, 5.0);
    assert_eq!(report.all_missing_columns, ["notes"]);
    assert_eq!(report.duplicate_rows, 1);
    assert_eq!(report.outlier_cells, 2);
    assert_eq!(report.outlier_columns[0].column, "salary");

    // 5% missing is inside the grace band; 25 duplicate + 14.29 outlier + 10 empty column
    assert_eq!(report.penalties.missing, 0.0);
    assert!((report.penalties.duplicate - 25.0).abs() < 1e-9);
    assert!((report.score - 50.714_285_714).abs() < 1e-6, "score was {}", report.score);
    assert_eq!(report.tier, QualityTier::Acceptable);
}

#[test]
fn test_messy_dataset_issues() {
    let dataset = load_dataset("messy.csv", FrameOptions::default());
    let report = analyze(&dataset);

    assert_eq!(
        report.issue_descriptions(),
        [
            "Column 'age' has 16.7% missing values (2 of 12 rows)",
            "Column 'salary' has 8.3% missing values (1 of 12 rows)",
            "Column 'notes' contains only missing values",
            "1 duplicate rows detected (8.3%)",
            "Column 'salary' has significant outliers (2 values, 18.2%)",
        ]
    );

    let severities: Vec<Severity> = report.issues.iter().map(|i| i.severity).collect();
    assert_eq!(
        severities,
        [
            Severity::Medium,
            Severity::Low,
            Severity::Critical,
            Severity::Medium,
            Severity::Medium,
        ]
    );
    assert_eq!(report.worst_severity(), Some(Severity::Critical));
}

#[test]
fn test_messy_dataset_insights() {
    let dataset = load_dataset("messy.csv", FrameOptions::default());
    let report = analyze(&dataset);

    let kinds: Vec<InsightKind> = report.insights.iter().map(|i| i.kind).collect();
    assert!(kinds.contains(&InsightKind::Imputation));
    assert!(kinds.contains(&InsightKind::DropColumn));
    assert!(kinds.contains(&InsightKind::Deduplicate));
    assert!(kinds.contains(&InsightKind::Skewness));
    assert!(!kinds.contains(&InsightKind::NoIssues));

    // salary is skewed and has outliers
    let salary = report
        .insights
        .iter()
        .find(|i| i.kind == InsightKind::Imputation && i.columns == ["salary"])
        .expect("Expected an imputation insight for salary");
    assert!(salary.message.contains("median"));
}

#[test]
fn test_markers_as_missing_adds_missing_values() {
    let options = FrameOptions::default().with_error_markers_as_missing(true);
    let dataset = load_dataset("messy.csv", options);
    let report = analyze(&dataset);

    assert_eq!(report.missing_cells, 5);
    // 8.3% missing falls in the moderate band
    assert!((report.penalties.missing - 8.333_333_333).abs() < 1e-6);
    assert!(
        report
            .issues
            .iter()
            .any(|i| i.kind == IssueKind::MissingValues && i.columns == ["dept"])
    );
}

#[test]
fn test_analyze_twice_gives_identical_reports() {
    let dataset = load_dataset("messy.csv", FrameOptions::default());
    let analyzer = QualityAnalyzer::default();

    let first = analyzer.analyze_dataset(&dataset).unwrap();
    let second = analyzer.analyze_dataset(&dataset).unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[test]
fn test_config_from_json_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("analyzer.json");
    std::fs::write(&path, r#"{ "duplicate_weight": 0.0, "all_missing_penalty": 0.0 }"#).unwrap();

    let config = AnalyzerConfig::from_json_file(&path).unwrap();
    assert_eq!(config.missing_weight, 2.0);

    let analyzer = QualityAnalyzer::new(config).unwrap();
    let dataset = load_dataset("messy.csv", FrameOptions::default());
    let report = analyzer.analyze_dataset(&dataset).unwrap();

    assert_eq!(report.penalties.duplicate, 0.0);
    assert_eq!(report.penalties.all_missing, 0.0);
    assert!((report.score - 85.714_285_714).abs() < 1e-6, "score was {}", report.score);
    assert_eq!(report.tier, QualityTier::Excellent);
}

// ============================================================================
// Loader and Report Tests
// ============================================================================

#[test]
fn test_load_parquet() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("small.parquet");
    let mut df: DataFrame = df!(
        "x" => [Some(1.0f64), None, Some(3.0), Some(4.0)],
        "label" => ["a", "b", "a", "c"],
    )
    .unwrap();
    ParquetWriter::new(File::create(&path).unwrap())
        .finish(&mut df)
        .unwrap();

    let loaded = load_dataframe(&path).unwrap();
    let dataset = Dataset::try_from(&loaded).unwrap();
    assert_eq!(dataset.shape(), (4, 2));
    assert_eq!(dataset.missing_cells(), 1);
}

#[test]
fn test_excel_is_rejected() {
    let err = load_dataframe(fixtures_path().join("book.xlsx")).unwrap_err();
    assert!(matches!(err, ProfilerError::UnsupportedFormat(_)));
}

#[test]
fn test_emit_report_round_trip() {
    let dataset = load_dataset("messy.csv", FrameOptions::default());
    let profile = DataProfiler::profile(&dataset, 0.7);
    let quality = QualityAnalyzer::default()
        .analyze(&dataset, &profile.summaries)
        .unwrap();
    let report = ReportGenerator::build_report("messy.csv", &profile, &quality);

    let dir = TempDir::new().unwrap();
    let path = ReportGenerator::new(dir.path())
        .write_report_to_file(&report, "messy")
        .unwrap();
    assert!(path.ends_with("messy_profile.json"));

    let written: ProfileReport =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written.dataset_profile.rows, 12);
    assert_eq!(written.dataset_profile.missing_cells, 15);
    assert_eq!(written.quality.issues, report.quality.issues);
    assert_eq!(written.missing_by_column[0].column, "notes");
}
