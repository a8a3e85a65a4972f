//! Core types for the Purchase Insight Engine

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Category, Transaction};

/// Score at or above which a purchase is good
pub const GOOD_THRESHOLD: i32 = 20;

/// Score at or below which a purchase is bad
pub const BAD_THRESHOLD: i32 = -20;

/// Bounds of a purchase score
pub const MAX_SCORE: i32 = 100;
pub const MIN_SCORE: i32 = -100;

/// Verdict on a single purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Good,
    Bad,
    Neutral,
}

impl Classification {
    /// Classification is a pure function of the (clamped) score
    pub fn from_score(score: i32) -> Self {
        if score >= GOOD_THRESHOLD {
            Self::Good
        } else if score <= BAD_THRESHOLD {
            Self::Bad
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Bad => "bad",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What kind of purchase the classifier thinks this was
///
/// Not to be confused with [`Category`], which is the spending category the
/// transaction was filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseCategory {
    Essential,
    Investment,
    Entertainment,
    Impulse,
    Waste,
}

impl PurchaseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Essential => "essential",
            Self::Investment => "investment",
            Self::Entertainment => "entertainment",
            Self::Impulse => "impulse",
            Self::Waste => "waste",
        }
    }
}

impl fmt::Display for PurchaseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Effect of a purchase on financial health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Negative,
    Neutral,
}

impl Impact {
    pub fn from_classification(classification: Classification) -> Self {
        match classification {
            Classification::Good => Self::Positive,
            Classification::Bad => Self::Negative,
            Classification::Neutral => Self::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of classifying one transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseAnalysis {
    pub id: String,
    pub transaction: Transaction,
    pub classification: Classification,
    /// Clamped to [-100, 100]
    pub score: i32,
    /// Comma-joined list of the rules that fired
    pub reasoning: String,
    pub category: PurchaseCategory,
    pub impact: Impact,
}

/// Direction of a category's month-over-month spending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Predicted month-over-month spending increase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Projected spend for one category next month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPrediction {
    pub category: Category,
    /// Rounded to whole currency units
    pub estimated: f64,
    /// 0, 30, 60 or 90 depending on months of history
    pub confidence: u8,
    pub trend: Trend,
}

/// Next month's spending forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPrediction {
    /// e.g., "November 2026"
    pub month: String,
    pub total_estimated: f64,
    pub category_breakdown: Vec<CategoryPrediction>,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<String>,
}

/// Direction of purchase scores over the last two months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpendingPattern {
    Improving,
    Declining,
    Stable,
}

impl SpendingPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Declining => "declining",
            Self::Stable => "stable",
        }
    }
}

impl fmt::Display for SpendingPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    /// Mean recent score minus mean older score
    pub improvement_score: f64,
    pub spending_pattern: SpendingPattern,
    pub risk_areas: Vec<String>,
    pub strengths: Vec<String>,
}

/// Everything the insights panel renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseInsights {
    pub good_purchases: Vec<PurchaseAnalysis>,
    pub bad_purchases: Vec<PurchaseAnalysis>,
    pub neutral_purchases: Vec<PurchaseAnalysis>,
    /// Sum of good expense amounts (income excluded)
    pub total_good_value: f64,
    /// Sum of bad expense amounts
    pub total_bad_value: f64,
    pub good_bad_ratio: f64,
    pub monthly_prediction: MonthlyPrediction,
    pub trends: TrendSummary,
}
