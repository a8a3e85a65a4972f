//! Purchase Insight Engine
//!
//! Deterministic heuristics over an in-memory transaction list. Every
//! function takes "now" explicitly so results are reproducible.
//!
//! ## Components
//!
//! - **Classifier** - Scores one transaction as good, bad or neutral
//! - **Engine** - Partitions a dataset and computes good/bad totals
//! - **Predictor** - Projects next month's spend by category
//! - **Trends** - Compares recent and older purchase scores
//! - **Cash flow** - Day-by-day balance projection
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::insights::analyze_all_purchases;
//!
//! let insights = analyze_all_purchases(&transactions, now);
//! println!("{}", insights.monthly_prediction.risk_level);
//! ```

pub mod cash_flow;
pub mod classifier;
pub mod engine;
pub mod predictor;
pub mod rules;
pub mod trends;
pub mod types;

pub use cash_flow::{
    project_cash_flow, CashFlowPoint, CashFlowProjection, ProjectionOptions, MAX_PROJECTION_DAYS,
    MAX_WINDOW_DAYS,
};
pub use classifier::analyze_purchase;
pub use engine::{analyze_all_purchases, good_bad_ratio};
pub use predictor::generate_monthly_prediction;
pub use trends::analyze_trends;
pub use types::{
    CategoryPrediction, Classification, Impact, MonthlyPrediction, PurchaseAnalysis,
    PurchaseCategory, PurchaseInsights, RiskLevel, SpendingPattern, Trend, TrendSummary,
};
