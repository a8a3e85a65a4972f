//! Insight Engine - runs the classifier over a dataset and assembles the
//! insights panel (partitions, totals, prediction, trends)

use chrono::NaiveDateTime;
use tracing::debug;

use crate::models::Transaction;

use super::classifier::analyze_purchase;
use super::predictor::generate_monthly_prediction;
use super::trends::analyze_trends;
use super::types::{Classification, PurchaseAnalysis, PurchaseInsights};

/// Ratio reported when there is good spending but no bad spending
pub const NO_BAD_SPENDING_RATIO: f64 = 10.0;

/// Classify every transaction and build the full insights bundle
pub fn analyze_all_purchases(transactions: &[Transaction], now: NaiveDateTime) -> PurchaseInsights {
    let analyses: Vec<PurchaseAnalysis> = transactions.iter().map(analyze_purchase).collect();

    let mut good_purchases = Vec::new();
    let mut bad_purchases = Vec::new();
    let mut neutral_purchases = Vec::new();

    for analysis in &analyses {
        match analysis.classification {
            Classification::Good => good_purchases.push(analysis.clone()),
            Classification::Bad => bad_purchases.push(analysis.clone()),
            Classification::Neutral => neutral_purchases.push(analysis.clone()),
        }
    }

    let total_good_value = expense_total(&good_purchases);
    let total_bad_value = expense_total(&bad_purchases);
    let good_bad_ratio = good_bad_ratio(total_good_value, total_bad_value);

    let monthly_prediction = generate_monthly_prediction(transactions, now);
    let trends = analyze_trends(&analyses, good_bad_ratio, now);

    debug!(
        transactions = transactions.len(),
        good = good_purchases.len(),
        bad = bad_purchases.len(),
        neutral = neutral_purchases.len(),
        good_bad_ratio,
        "Purchase analysis complete"
    );

    PurchaseInsights {
        good_purchases,
        bad_purchases,
        neutral_purchases,
        total_good_value,
        total_bad_value,
        good_bad_ratio,
        monthly_prediction,
        trends,
    }
}

/// Good-to-bad spending ratio, finite even when there is no bad spending
pub fn good_bad_ratio(total_good: f64, total_bad: f64) -> f64 {
    if total_bad > 0.0 {
        total_good / total_bad
    } else if total_good > 0.0 {
        NO_BAD_SPENDING_RATIO
    } else {
        1.0
    }
}

/// Income never counts toward good/bad spending totals
fn expense_total(analyses: &[PurchaseAnalysis]) -> f64 {
    analyses
        .iter()
        .filter(|a| a.transaction.is_expense())
        .map(|a| a.transaction.amount)
        .sum()
}
