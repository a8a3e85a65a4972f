//! Monthly spending predictor
//!
//! Projects next month's spend per category from the last three calendar
//! months of expenses (the current, partial month included):
//! - Average of the months that had spending in the category
//! - Nudged up or down 10% when the category is trending
//! - Risk level compares the projection with last month's actual spend

use chrono::NaiveDateTime;
use tracing::debug;

use crate::calendar::{month_label, same_month, shift_month};
use crate::models::{Category, Transaction};

use super::types::{CategoryPrediction, MonthlyPrediction, RiskLevel, Trend};

/// Calendar months of history considered (current month included)
pub const HISTORY_MONTHS: i32 = 3;

/// Confidence gained per month of history, capped at [`MAX_CONFIDENCE`]
pub const CONFIDENCE_PER_MONTH: u8 = 30;
pub const MAX_CONFIDENCE: u8 = 90;

/// A category's most recent month must differ from its oldest by this
/// fraction to count as trending
pub const TREND_THRESHOLD: f64 = 0.1;

/// Projection above last month's spend by this factor is high risk
pub const HIGH_RISK_FACTOR: f64 = 1.2;
pub const MEDIUM_RISK_FACTOR: f64 = 1.1;

/// Share of the projected total above which a category gets called out
pub const DOMINANT_CATEGORY_SHARE: f64 = 0.3;

/// Minimum estimate for an upward trend to be worth mentioning
pub const TRENDING_ALERT_MINIMUM: f64 = 200.0;

pub const HIGH_RISK_RECOMMENDATION: &str =
    "Consider ways to reduce discretionary spending next month";
pub const STABLE_RECOMMENDATION: &str = "Your spending patterns look stable for next month";

/// Predict next month's spending
pub fn generate_monthly_prediction(
    transactions: &[Transaction],
    now: NaiveDateTime,
) -> MonthlyPrediction {
    let today = now.date();
    let window_start = shift_month(today, -(HISTORY_MONTHS - 1));
    let window_end = shift_month(today, 1);

    let expenses: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.is_expense() && t.day() >= window_start && t.day() < window_end)
        .collect();

    let category_breakdown: Vec<CategoryPrediction> = Category::ALL
        .iter()
        .map(|&category| {
            let monthly: Vec<f64> = (0..HISTORY_MONTHS)
                .filter_map(|months_ago| {
                    let month = shift_month(today, -months_ago);
                    let total: f64 = expenses
                        .iter()
                        .filter(|t| t.category == category && same_month(t.day(), month))
                        .map(|t| t.amount)
                        .sum();
                    (total > 0.0).then_some(total)
                })
                .collect();
            predict_category(category, &monthly)
        })
        .filter(|p| p.estimated != 0.0)
        .collect();

    let total_estimated: f64 = category_breakdown.iter().map(|p| p.estimated).sum();

    let last_month = shift_month(today, -1);
    let last_month_actual: f64 = transactions
        .iter()
        .filter(|t| t.is_expense() && same_month(t.day(), last_month))
        .map(|t| t.amount)
        .sum();

    let risk_level = risk_level(total_estimated, last_month_actual);
    let recommendations = recommendations(&category_breakdown, total_estimated, risk_level);

    debug!(
        categories = category_breakdown.len(),
        total_estimated,
        last_month_actual,
        risk = risk_level.as_str(),
        "Monthly prediction generated"
    );

    MonthlyPrediction {
        month: month_label(window_end),
        total_estimated,
        category_breakdown,
        risk_level,
        recommendations,
    }
}

/// Predict one category from its monthly totals, most recent first
pub fn predict_category(category: Category, monthly: &[f64]) -> CategoryPrediction {
    if monthly.is_empty() {
        return CategoryPrediction {
            category,
            estimated: 0.0,
            confidence: 0,
            trend: Trend::Stable,
        };
    }

    let average = monthly.iter().sum::<f64>() / monthly.len() as f64;
    let trend = trend(monthly);

    let estimated = match trend {
        Trend::Increasing => average * (1.0 + TREND_THRESHOLD),
        Trend::Decreasing => average * (1.0 - TREND_THRESHOLD),
        Trend::Stable => average,
    }
    .round();

    let confidence = (monthly.len() as u8)
        .saturating_mul(CONFIDENCE_PER_MONTH)
        .min(MAX_CONFIDENCE);

    CategoryPrediction {
        category,
        estimated,
        confidence,
        trend,
    }
}

/// Compare the most recent month against the oldest one collected
fn trend(monthly: &[f64]) -> Trend {
    if monthly.len() < 2 {
        return Trend::Stable;
    }
    let recent = monthly[0];
    let oldest = monthly[monthly.len() - 1];

    if recent > oldest * (1.0 + TREND_THRESHOLD) {
        Trend::Increasing
    } else if recent < oldest * (1.0 - TREND_THRESHOLD) {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

fn risk_level(total_estimated: f64, last_month_actual: f64) -> RiskLevel {
    if total_estimated > last_month_actual * HIGH_RISK_FACTOR {
        RiskLevel::High
    } else if total_estimated > last_month_actual * MEDIUM_RISK_FACTOR {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn recommendations(
    breakdown: &[CategoryPrediction],
    total_estimated: f64,
    risk_level: RiskLevel,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if risk_level == RiskLevel::High {
        recommendations.push(HIGH_RISK_RECOMMENDATION.to_string());
    }

    // First category wins ties
    let mut largest: Option<&CategoryPrediction> = None;
    for prediction in breakdown {
        if largest.map_or(true, |l| prediction.estimated > l.estimated) {
            largest = Some(prediction);
        }
    }
    if let Some(largest) = largest {
        if largest.estimated > total_estimated * DOMINANT_CATEGORY_SHARE {
            recommendations.push(format!(
                "Monitor {} spending — it's your largest predicted expense",
                largest.category
            ));
        }
    }

    for prediction in breakdown {
        if prediction.trend == Trend::Increasing && prediction.estimated > TRENDING_ALERT_MINIMUM
        {
            recommendations.push(format!(
                "{} spending is trending upward",
                prediction.category.label()
            ));
        }
    }

    if recommendations.is_empty() {
        recommendations.push(STABLE_RECOMMENDATION.to_string());
    }

    recommendations
}
