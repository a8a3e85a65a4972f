//! Tally CLI - Personal finance insights dashboard
//!
//! Usage:
//!   tally demo                  Write a demo dataset
//!   tally insights              Good/bad purchases, prediction, trends
//!   tally projection --days 60  Cash-flow projection
//!   tally serve --port 3000     Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref())?;
    let now = commands::resolve_now(cli.now.as_deref())?;
    let data_path = cli.data.clone().unwrap_or_else(|| config.data_path.clone());

    match cli.command {
        Commands::Demo { output } => {
            commands::cmd_demo(output.as_deref().unwrap_or(&data_path), now)
        }
        Commands::Classify { limit } => {
            let transactions = commands::load_transactions(&data_path)?;
            commands::cmd_classify(&transactions, limit, cli.json)
        }
        Commands::Insights => {
            let transactions = commands::load_transactions(&data_path)?;
            commands::cmd_insights(&transactions, now, cli.json)
        }
        Commands::Predict => {
            let transactions = commands::load_transactions(&data_path)?;
            commands::cmd_predict(&transactions, now, cli.json)
        }
        Commands::Trends => {
            let transactions = commands::load_transactions(&data_path)?;
            commands::cmd_trends(&transactions, now, cli.json)
        }
        Commands::Overview => {
            let transactions = commands::load_transactions(&data_path)?;
            commands::cmd_overview(&transactions, now, cli.json)
        }
        Commands::Projection {
            days,
            balance,
            window,
        } => {
            let transactions = commands::load_transactions(&data_path)?;
            let options = commands::projection_options(&config.projection, days, balance, window)?;
            commands::cmd_projection(&transactions, &options, now, cli.json)
        }
        Commands::Serve { port, host } => {
            let transactions = commands::load_transactions(&data_path)?;
            let mut server_config = tally_server::ServerConfig::from_config(&config);
            // Only pin "now" when asked to, otherwise each request uses the clock
            if cli.now.is_some() {
                server_config.now = Some(now);
            }
            commands::cmd_serve(
                transactions,
                &data_path,
                host.as_deref().unwrap_or(&config.server.host),
                port.unwrap_or(config.server.port),
                server_config,
            )
            .await
        }
    }
}
