//! Purchase classifier
//!
//! Scores a single transaction against the rule table and derives its
//! classification, reasoning and purchase category.

use crate::models::Transaction;

use super::rules::RULES;
use super::types::{
    Classification, Impact, PurchaseAnalysis, PurchaseCategory, MAX_SCORE, MIN_SCORE,
};

/// Reasoning used when no rule fired
pub const STANDARD_REASONING: &str = "Standard transaction";

/// Reasoning attached to every income transaction
pub const INCOME_REASONING: &str = "Income is always positive for financial health";

/// Classify one transaction
pub fn analyze_purchase(tx: &Transaction) -> PurchaseAnalysis {
    if tx.is_income() {
        return PurchaseAnalysis {
            id: analysis_id(tx),
            transaction: tx.clone(),
            classification: Classification::Good,
            score: MAX_SCORE,
            reasoning: INCOME_REASONING.to_string(),
            category: PurchaseCategory::Essential,
            impact: Impact::Positive,
        };
    }

    let mut score = 0;
    let mut reasons: Vec<&'static str> = Vec::new();
    let mut category = PurchaseCategory::Essential;

    for rule in RULES {
        let Some(adjustment) = (rule.evaluate)(tx) else {
            continue;
        };

        score += adjustment.delta;
        if let Some(tag) = adjustment.tag {
            reasons.push(tag);
        }
        if let Some(assigned) = adjustment.category {
            category = assigned;
        }
    }

    let score = score.clamp(MIN_SCORE, MAX_SCORE);
    let classification = Classification::from_score(score);

    let reasoning = if reasons.is_empty() {
        STANDARD_REASONING.to_string()
    } else {
        reasons.join(", ")
    };

    PurchaseAnalysis {
        id: analysis_id(tx),
        transaction: tx.clone(),
        classification,
        score,
        reasoning,
        category,
        impact: Impact::from_classification(classification),
    }
}

fn analysis_id(tx: &Transaction) -> String {
    format!("analysis-{}", tx.id)
}
