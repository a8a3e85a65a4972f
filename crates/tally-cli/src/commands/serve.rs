//! Server command implementation

use std::path::Path;

use anyhow::Result;
use tally_core::Transaction;
use tally_server::ServerConfig;

pub async fn cmd_serve(
    transactions: Vec<Transaction>,
    data_path: &Path,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> Result<()> {
    println!("🚀 Starting Tally web server...");
    println!("   Dataset: {} ({} transactions)", data_path.display(), transactions.len());
    println!("   Listening: http://{}:{}/api", host, port);
    if let Some(now) = config.now {
        println!("   📌 Pinned now: {}", now);
    }
    if !config.allowed_origins.is_empty() {
        println!("   🌐 CORS origins: {}", config.allowed_origins.join(", "));
    }
    println!();
    println!("   Press Ctrl+C to stop");

    tally_server::serve(transactions, host, port, config).await
}
