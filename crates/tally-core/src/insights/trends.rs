//! Trend analyzer
//!
//! Compares purchase scores from the last 30 days against the 30 days
//! before that, and calls out purchase categories that keep coming up.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime};

use super::types::{
    Classification, PurchaseAnalysis, PurchaseCategory, SpendingPattern, TrendSummary,
};

/// Length of each comparison window
pub const WINDOW_DAYS: i64 = 30;

/// Score delta beyond which the pattern is no longer stable
pub const PATTERN_THRESHOLD: f64 = 10.0;

/// Bad purchases in one category before it becomes a risk area
pub const RISK_AREA_MIN_COUNT: usize = 3;

/// Good purchases in one category before it becomes a strength
pub const STRENGTH_MIN_COUNT: usize = 5;

/// Good/bad ratio above which overall spending counts as a strength
pub const STRONG_RATIO: f64 = 2.0;

/// Summarize how purchase quality is moving
pub fn analyze_trends(
    analyses: &[PurchaseAnalysis],
    good_bad_ratio: f64,
    now: NaiveDateTime,
) -> TrendSummary {
    let recent_start = now - Duration::days(WINDOW_DAYS);
    let older_start = now - Duration::days(WINDOW_DAYS * 2);

    let mut recent = Vec::new();
    let mut older = Vec::new();
    for analysis in analyses {
        let date = analysis.transaction.date;
        if date > recent_start && date <= now {
            recent.push(analysis.score);
        } else if date > older_start && date <= recent_start {
            older.push(analysis.score);
        }
    }

    let improvement_score = if recent.is_empty() || older.is_empty() {
        0.0
    } else {
        mean(&recent) - mean(&older)
    };

    let spending_pattern = if improvement_score > PATTERN_THRESHOLD {
        SpendingPattern::Improving
    } else if improvement_score < -PATTERN_THRESHOLD {
        SpendingPattern::Declining
    } else {
        SpendingPattern::Stable
    };

    let risk_areas = frequent_categories(analyses, Classification::Bad, RISK_AREA_MIN_COUNT)
        .map(|category| format!("Frequent {} purchases", category))
        .collect();

    let mut strengths: Vec<String> =
        frequent_categories(analyses, Classification::Good, STRENGTH_MIN_COUNT)
            .map(|category| format!("Strong {} spending habits", category))
            .collect();
    if good_bad_ratio > STRONG_RATIO {
        strengths.push("Overall positive spending patterns".to_string());
    }

    TrendSummary {
        improvement_score,
        spending_pattern,
        risk_areas,
        strengths,
    }
}

fn mean(scores: &[i32]) -> f64 {
    scores.iter().map(|&s| f64::from(s)).sum::<f64>() / scores.len() as f64
}

/// Purchase categories with at least `min_count` analyses of the given
/// classification, in category order
fn frequent_categories(
    analyses: &[PurchaseAnalysis],
    classification: Classification,
    min_count: usize,
) -> impl Iterator<Item = PurchaseCategory> {
    let mut counts: BTreeMap<PurchaseCategory, usize> = BTreeMap::new();
    for analysis in analyses.iter().filter(|a| a.classification == classification) {
        *counts.entry(analysis.category).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(move |&(_, count)| count >= min_count)
        .map(|(category, _)| category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::classifier::analyze_purchase;
    use crate::models::Category;
    use crate::test_utils::{at, expense, income};

    fn now() -> NaiveDateTime {
        at(2026, 6, 30, 12)
    }

    #[test]
    fn test_empty_buckets_score_zero() {
        let summary = analyze_trends(&[], 1.0, now());

        assert_eq!(summary.improvement_score, 0.0);
        assert_eq!(summary.spending_pattern, SpendingPattern::Stable);
        assert!(summary.risk_areas.is_empty());
        assert!(summary.strengths.is_empty());
    }

    #[test]
    fn test_one_sided_history_scores_zero() {
        let recent_only: Vec<_> = [expense(40.0, Category::Food).on(at(2026, 6, 20, 12))]
            .iter()
            .map(analyze_purchase)
            .collect();
        assert_eq!(recent_only[0].score, 30);

        let summary = analyze_trends(&recent_only, 1.0, now());
        assert_eq!(summary.improvement_score, 0.0);
        assert_eq!(summary.spending_pattern, SpendingPattern::Stable);

        let older_only: Vec<_> = [expense(250.0, Category::Shopping).on(at(2026, 5, 10, 23))]
            .iter()
            .map(analyze_purchase)
            .collect();
        assert_eq!(analyze_trends(&older_only, 1.0, now()).improvement_score, 0.0);
    }

    #[test]
    fn test_improving_pattern() {
        let analyses: Vec<_> = [
            // Older window: late-night impulse shopping
            expense(250.0, Category::Shopping).on(at(2026, 5, 10, 23)),
            // Recent window: groceries
            expense(40.0, Category::Food).on(at(2026, 6, 20, 12)),
        ]
        .iter()
        .map(analyze_purchase)
        .collect();

        let summary = analyze_trends(&analyses, 1.0, now());

        // 30 - (-55)
        assert_eq!(summary.improvement_score, 85.0);
        assert_eq!(summary.spending_pattern, SpendingPattern::Improving);
    }

    #[test]
    fn test_declining_pattern() {
        let analyses: Vec<_> = [
            expense(40.0, Category::Food).on(at(2026, 5, 10, 12)),
            expense(40.0, Category::Food).on(at(2026, 6, 20, 2)),
        ]
        .iter()
        .map(analyze_purchase)
        .collect();

        let summary = analyze_trends(&analyses, 1.0, now());

        // 5 - 30
        assert_eq!(summary.improvement_score, -25.0);
        assert_eq!(summary.spending_pattern, SpendingPattern::Declining);
    }

    #[test]
    fn test_transactions_outside_windows_ignored() {
        let analyses: Vec<_> = [
            expense(40.0, Category::Food).on(at(2026, 6, 20, 12)),
            expense(250.0, Category::Shopping).on(at(2026, 3, 1, 23)),
            expense(250.0, Category::Shopping).on(at(2026, 7, 15, 23)),
        ]
        .iter()
        .map(analyze_purchase)
        .collect();

        let summary = analyze_trends(&analyses, 1.0, now());
        assert_eq!(summary.improvement_score, 0.0);
    }

    #[test]
    fn test_risk_areas_and_strengths() {
        let mut txs = vec![];
        for _ in 0..3 {
            txs.push(expense(300.0, Category::Shopping));
        }
        for _ in 0..2 {
            txs.push(expense(10.0, Category::Other).with_description("Refund"));
        }
        for _ in 0..5 {
            txs.push(income(1000.0));
        }
        let analyses: Vec<_> = txs.iter().map(analyze_purchase).collect();

        let summary = analyze_trends(&analyses, 2.5, now());

        assert_eq!(summary.risk_areas, vec!["Frequent impulse purchases"]);
        assert_eq!(
            summary.strengths,
            vec![
                "Strong essential spending habits",
                "Overall positive spending patterns",
            ]
        );
    }

    #[test]
    fn test_ratio_at_threshold_is_not_a_strength() {
        let summary = analyze_trends(&[], 2.0, now());
        assert!(summary.strengths.is_empty());
    }
}
