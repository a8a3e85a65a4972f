//! Shared utilities for loading config and data
//!
//! This module contains:
//! - `load_config` - Resolve the layered config
//! - `load_transactions` - Read and validate the dataset
//! - `resolve_now` - Parse the `--now` override

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use tally_core::{dataset, TallyConfig, Transaction};

pub fn load_config(path: Option<&Path>) -> Result<TallyConfig> {
    TallyConfig::load(path).context("Failed to load config")
}

/// Load the dataset, pointing at `tally demo` when it doesn't exist yet
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    if !path.exists() {
        anyhow::bail!(
            "No dataset at {}. Create one with: tally demo --output {}",
            path.display(),
            path.display()
        );
    }
    dataset::load(path).with_context(|| format!("Failed to load {}", path.display()))
}

/// `--now` if given, otherwise the local clock
pub fn resolve_now(value: Option<&str>) -> Result<NaiveDateTime> {
    match value {
        Some(v) => tally_core::parse_timestamp(v).context("Invalid --now"),
        None => Ok(Local::now().naive_local()),
    }
}
