//! Demo dataset command

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use tally_core::{dataset, demo};

pub fn cmd_demo(output: &Path, now: NaiveDateTime) -> Result<()> {
    println!("🧪 Generating demo transactions...");

    let transactions = demo::generate(now);
    dataset::save(output, &transactions)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let first = transactions.first().map(|t| t.day());
    let last = transactions.last().map(|t| t.day());
    if let (Some(first), Some(last)) = (first, last) {
        println!("   Period: {} to {}", first, last);
    }
    println!(
        "✅ Wrote {} transactions to {}",
        transactions.len(),
        output.display()
    );
    println!();
    println!("Next steps:");
    println!("  1. See the insights: tally --data {} insights", output.display());
    println!("  2. Start web API:    tally --data {} serve", output.display());

    Ok(())
}
