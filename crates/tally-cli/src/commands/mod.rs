//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (load_config, load_transactions, resolve_now)
//! - `demo` - Demo dataset generation
//! - `insights` - Insight engine commands (classify, insights, predict, trends)
//! - `reports` - Dashboard reports (overview, projection)
//! - `serve` - Web server command

pub mod core;
pub mod demo;
pub mod insights;
pub mod reports;
pub mod serve;

// Re-export command functions for main.rs
pub use core::*;
pub use demo::*;
pub use insights::*;
pub use reports::*;
pub use serve::*;

use anyhow::{Context, Result};
use serde::Serialize;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Print a result as pretty JSON (for `--json`)
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
