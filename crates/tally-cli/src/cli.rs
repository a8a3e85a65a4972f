//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - See which purchases help and which hurt
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Personal finance insights dashboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Transaction dataset (JSON). Defaults to the configured data path
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Config file (defaults to ~/.local/share/tally/config/tally.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Pretend today is this date (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)
    #[arg(long, global = true)]
    pub now: Option<String>,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a demo dataset
    Demo {
        /// Output file (defaults to --data or the configured data path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Score each transaction as good, bad or neutral
    Classify {
        /// Number of transactions to show (newest first)
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Full insights summary (totals, prediction, trends)
    Insights,

    /// Predict next month's spending by category
    Predict,

    /// Compare recent purchase quality against the previous month
    Trends,

    /// Current month income, spending and savings
    Overview,

    /// Project the account balance day by day
    Projection {
        /// Days to project (defaults to config)
        #[arg(short, long)]
        days: Option<u32>,

        /// Starting balance (defaults to config)
        #[arg(short, long, allow_negative_numbers = true)]
        balance: Option<f64>,

        /// Trailing window in days for the moving averages (defaults to config)
        #[arg(short, long)]
        window: Option<u32>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on (defaults to config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to config)
        #[arg(long)]
        host: Option<String>,
    },
}
