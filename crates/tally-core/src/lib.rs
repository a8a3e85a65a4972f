//! Tally Core Library
//!
//! Shared functionality for the Tally personal finance dashboard:
//! - Transaction model and JSON dataset files
//! - Purchase insight engine (classification, prediction, trends)
//! - Cash-flow projection and monthly overview
//! - Layered TOML configuration
//! - Deterministic demo dataset

pub mod calendar;
pub mod config;
pub mod dataset;
pub mod demo;
pub mod error;
pub mod insights;
pub mod models;
pub mod overview;

/// Test utilities: transaction builders
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use calendar::parse_timestamp;
pub use config::{ServerSettings, TallyConfig};
pub use error::{Error, Result};
pub use insights::{
    analyze_all_purchases, analyze_purchase, analyze_trends, generate_monthly_prediction,
    project_cash_flow, CashFlowProjection, ProjectionOptions, PurchaseAnalysis, PurchaseInsights,
};
pub use models::{Category, Transaction, TransactionType};
pub use overview::{summarize_month, FinancialOverview};

/// Round a currency amount to whole cents
pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
