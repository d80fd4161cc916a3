//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;

use clap::Parser;
use tempfile::{NamedTempFile, TempDir};

use crate::cli::{Cli, Commands};
use crate::commands::{self, truncate};
use tally_core::InputFormat;

fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

const JSON_BATCH: &str = r#"{
    "expenses": [
        {"date": "2024-01-01", "amount": 12000, "category": "Food", "paymentMethod": "Cash"},
        {"date": "2024-01-02", "amount": "300", "category": "Rent", "paymentMethod": "Bank"}
    ],
    "userId": "u-1",
    "days": 14
}"#;

const CSV_BATCH: &str = "date,amount,category,paymentMethod\n\
2024-01-01,200,Food,Card\n\
2024-01-02,300,Rent,Bank\n";

// ========== Analyze Command Tests ==========

#[test]
fn test_cmd_analyze_json_file() {
    let file = write_temp(".json", JSON_BATCH);
    assert!(commands::cmd_analyze(None, file.path(), None, false).is_ok());
    assert!(commands::cmd_analyze(None, file.path(), None, true).is_ok());
}

#[test]
fn test_cmd_analyze_csv_file() {
    let file = write_temp(".csv", CSV_BATCH);
    assert!(commands::cmd_analyze(None, file.path(), None, false).is_ok());
}

#[test]
fn test_cmd_analyze_explicit_format() {
    // No extension; format forced
    let file = write_temp("", CSV_BATCH);
    assert!(commands::cmd_analyze(None, file.path(), Some(InputFormat::Csv), true).is_ok());
}

#[test]
fn test_cmd_analyze_missing_expenses() {
    let file = write_temp(".json", r#"{"userId": "u-1"}"#);
    let err = commands::cmd_analyze(None, file.path(), None, false).unwrap_err();
    assert!(format!("{:#}", err).contains("Missing expenses data"));
}

#[test]
fn test_cmd_analyze_invalid_record() {
    let file = write_temp(
        ".json",
        r#"[{"date": "2024-01-01", "amount": "abc", "category": "Food", "paymentMethod": "Cash"}]"#,
    );
    let err = commands::cmd_analyze(None, file.path(), None, false).unwrap_err();
    assert!(format!("{:#}", err).contains("Analysis failed"));
}

#[test]
fn test_cmd_analyze_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.json");
    assert!(commands::cmd_analyze(None, &path, None, false).is_err());
}

// ========== Insights Command Tests ==========

#[test]
fn test_cmd_insights() {
    let file = write_temp(".json", JSON_BATCH);
    assert!(commands::cmd_insights(None, file.path(), None, None, false).is_ok());
    assert!(commands::cmd_insights(None, file.path(), Some(7.5), None, true).is_ok());
}

#[test]
fn test_cmd_insights_zero_days() {
    let file = write_temp(".csv", CSV_BATCH);
    let err = commands::cmd_insights(None, file.path(), Some(0.0), None, false).unwrap_err();
    assert!(format!("{:#}", err).contains("Insights generation failed"));
}

#[test]
fn test_cmd_insights_invalid_days_in_file() {
    let file = write_temp(".json", r#"{"expenses": [], "days": -3}"#);
    let err = commands::cmd_insights(None, file.path(), None, None, false).unwrap_err();
    assert!(format!("{:#}", err).contains("Insights generation failed"));

    let file = write_temp(".json", r#"{"expenses": [], "days": "soon"}"#);
    let err = commands::cmd_insights(None, file.path(), None, None, false).unwrap_err();
    assert!(format!("{:#}", err).contains("days must be a number"));
}

// ========== Config Command Tests ==========

#[test]
fn test_cmd_config_default() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.toml");
    // Missing explicit file falls back to defaults
    assert!(commands::cmd_config(Some(&missing)).is_ok());
}

#[test]
fn test_load_analyzer_custom_config() {
    let file = write_temp(
        ".toml",
        "currency_symbol = \"$\"\n[thresholds]\nhigh = 20000.0\n",
    );
    let analyzer = commands::load_analyzer(Some(file.path())).unwrap();
    assert_eq!(analyzer.config().currency_symbol, "$");
    assert_eq!(analyzer.config().thresholds.high, 20000.0);
    assert_eq!(analyzer.config().thresholds.medium, 5000.0);
}

#[test]
fn test_load_analyzer_rejects_invalid_config() {
    let file = write_temp(".toml", "[thresholds]\nlow = 9000.0\nmedium = 100.0\n");
    assert!(commands::load_analyzer(Some(file.path())).is_err());
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_analyze_args() {
    let cli = Cli::try_parse_from(["tally", "analyze", "--file", "x.csv", "--json"]).unwrap();
    match cli.command {
        Commands::Analyze { file, format, json } => {
            assert_eq!(file.to_str(), Some("x.csv"));
            assert!(format.is_none());
            assert!(json);
        }
        _ => panic!("expected analyze"),
    }
}

#[test]
fn test_parse_insights_args() {
    let cli = Cli::try_parse_from([
        "tally", "-v", "insights", "-f", "x.json", "--days", "7.5", "--format", "csv",
    ])
    .unwrap();
    assert!(cli.verbose);
    match cli.command {
        Commands::Insights { days, format, .. } => {
            assert_eq!(days, Some(7.5));
            assert_eq!(format, Some(InputFormat::Csv));
        }
        _ => panic!("expected insights"),
    }
}

#[test]
fn test_parse_rejects_unknown_format() {
    assert!(Cli::try_parse_from(["tally", "analyze", "-f", "x", "--format", "xml"]).is_err());
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("Food", 10), "Food");
    assert_eq!(truncate("Entertainment and leisure", 10), "Enterta...");
    assert_eq!(truncate("₹₹₹₹₹₹", 5), "₹₹...");
}
