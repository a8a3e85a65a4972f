//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::fs;

use clap::Parser;
use tally_core::insights::{ProjectionOptions, MAX_PROJECTION_DAYS, MAX_WINDOW_DAYS};
use tally_core::models::Category;
use tally_core::test_utils::{at, expense, income};
use tally_core::{dataset, Transaction};
use tempfile::TempDir;

use crate::cli::{Cli, Commands};
use crate::commands::{self, truncate};

fn sample_transactions() -> Vec<Transaction> {
    vec![
        income(3200.0).on_day(2026, 6, 1).recurring(),
        expense(1850.0, Category::Housing).on_day(2026, 6, 1).recurring(),
        expense(42.0, Category::Food).on_day(2026, 6, 4),
        expense(129.99, Category::Shopping).on_day(2026, 6, 6).at_hour(23),
        expense(1800.0, Category::Housing).on_day(2026, 5, 1).recurring(),
    ]
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("exactly ten", 11), "exactly ten");
    assert_eq!(truncate("a much longer description", 10), "a much ...");
    // Multi-byte characters are not split
    assert_eq!(truncate("Café Crème Brûlée", 8), "Café ...");
}

#[test]
fn test_resolve_now() {
    let now = commands::resolve_now(Some("2026-06-15T08:00:00")).unwrap();
    assert_eq!(now, at(2026, 6, 15, 8));

    assert!(commands::resolve_now(Some("15/06/2026")).is_err());
    assert!(commands::resolve_now(None).is_ok());
}

#[test]
fn test_projection_options_overrides() {
    let base = ProjectionOptions::default();

    let options = commands::projection_options(&base, Some(60), Some(-250.0), None).unwrap();
    assert_eq!(options.days, 60);
    assert_eq!(options.starting_balance, -250.0);
    assert_eq!(options.window_days, base.window_days);

    assert!(commands::projection_options(&base, None, None, Some(0)).is_err());
}

#[test]
fn test_projection_options_limits() {
    let base = ProjectionOptions::default();

    let options = commands::projection_options(
        &base,
        Some(MAX_PROJECTION_DAYS),
        None,
        Some(MAX_WINDOW_DAYS),
    )
    .unwrap();
    assert_eq!(options.days, MAX_PROJECTION_DAYS);
    assert_eq!(options.window_days, MAX_WINDOW_DAYS);

    assert!(commands::projection_options(&base, Some(u32::MAX), None, None).is_err());
    assert!(commands::projection_options(&base, None, None, Some(u32::MAX)).is_err());
}

// ========== Dataset Command Tests ==========

#[test]
fn test_cmd_demo_writes_dataset() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("demo").join("transactions.json");

    commands::cmd_demo(&path, at(2026, 6, 20, 12)).unwrap();

    let loaded = commands::load_transactions(&path).unwrap();
    assert!(!loaded.is_empty());
    assert!(loaded.iter().all(|t| t.date <= at(2026, 6, 20, 12)));
}

#[test]
fn test_load_transactions_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = commands::load_transactions(&dir.path().join("none.json")).unwrap_err();
    assert!(err.to_string().contains("tally demo"));
}

#[test]
fn test_load_transactions_invalid_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "[{\"id\": 1}").unwrap();

    assert!(commands::load_transactions(&path).is_err());
}

#[test]
fn test_load_config_explicit_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tally.toml");
    fs::write(&path, "[projection]\ndays = 14\n").unwrap();

    let config = commands::load_config(Some(&path)).unwrap();
    assert_eq!(config.projection.days, 14);

    assert!(commands::load_config(Some(&dir.path().join("missing.toml"))).is_err());
}

// ========== Report Command Tests ==========

#[test]
fn test_cmd_classify() {
    let txs = sample_transactions();
    assert!(commands::cmd_classify(&txs, 3, false).is_ok());
    assert!(commands::cmd_classify(&txs, 3, true).is_ok());
    assert!(commands::cmd_classify(&[], 10, false).is_ok());
}

#[test]
fn test_cmd_insights_and_friends() {
    let txs = sample_transactions();
    let now = at(2026, 6, 15, 12);

    for json in [false, true] {
        assert!(commands::cmd_insights(&txs, now, json).is_ok());
        assert!(commands::cmd_predict(&txs, now, json).is_ok());
        assert!(commands::cmd_trends(&txs, now, json).is_ok());
        assert!(commands::cmd_overview(&txs, now, json).is_ok());
    }

    assert!(commands::cmd_insights(&[], now, false).is_ok());
    assert!(commands::cmd_overview(&[], now, false).is_ok());
}

#[test]
fn test_cmd_projection() {
    let txs = sample_transactions();
    let now = at(2026, 6, 15, 12);
    let options = ProjectionOptions {
        starting_balance: 500.0,
        days: 20,
        window_days: 30,
    };

    assert!(commands::cmd_projection(&txs, &options, now, false).is_ok());
    assert!(commands::cmd_projection(&txs, &options, now, true).is_ok());

    let none = ProjectionOptions {
        days: 0,
        ..options
    };
    assert!(commands::cmd_projection(&txs, &none, now, false).is_ok());
}

#[test]
fn test_round_trip_through_dataset_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tx.json");
    dataset::save(&path, &sample_transactions()).unwrap();

    let loaded = commands::load_transactions(&path).unwrap();
    assert!(commands::cmd_classify(&loaded, 20, false).is_ok());
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_global_flags() {
    let cli = Cli::try_parse_from([
        "tally",
        "overview",
        "--data",
        "/tmp/tx.json",
        "--now",
        "2026-06-15",
        "--json",
    ])
    .unwrap();

    assert!(cli.json);
    assert_eq!(cli.now.as_deref(), Some("2026-06-15"));
    assert_eq!(cli.data.unwrap().to_str(), Some("/tmp/tx.json"));
    assert!(matches!(cli.command, Commands::Overview));
}

#[test]
fn test_parse_projection_args() {
    let cli = Cli::try_parse_from([
        "tally",
        "projection",
        "--days",
        "60",
        "--balance",
        "-120.5",
        "--window",
        "45",
    ])
    .unwrap();

    match cli.command {
        Commands::Projection {
            days,
            balance,
            window,
        } => {
            assert_eq!(days, Some(60));
            assert_eq!(balance, Some(-120.5));
            assert_eq!(window, Some(45));
        }
        _ => panic!("expected projection command"),
    }
}

#[test]
fn test_parse_classify_default_limit() {
    let cli = Cli::try_parse_from(["tally", "classify"]).unwrap();
    assert!(matches!(cli.command, Commands::Classify { limit: 20 }));

    assert!(Cli::try_parse_from(["tally", "bogus"]).is_err());
}
