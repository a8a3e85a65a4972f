//! Insight engine command implementations

use anyhow::Result;
use chrono::NaiveDateTime;
use tally_core::insights::{
    analyze_all_purchases, analyze_purchase, generate_monthly_prediction, Classification,
    MonthlyPrediction, PurchaseAnalysis, RiskLevel, SpendingPattern, Trend, TrendSummary,
};
use tally_core::Transaction;

use super::{print_json, truncate};

fn classification_icon(classification: Classification) -> &'static str {
    match classification {
        Classification::Good => "✅",
        Classification::Bad => "❌",
        Classification::Neutral => "➖",
    }
}

/// Per-transaction scores, newest first
pub fn cmd_classify(transactions: &[Transaction], limit: usize, json: bool) -> Result<()> {
    let mut newest: Vec<&Transaction> = transactions.iter().collect();
    newest.sort_by(|a, b| b.date.cmp(&a.date));

    let analyses: Vec<PurchaseAnalysis> = newest
        .into_iter()
        .take(limit)
        .map(analyze_purchase)
        .collect();

    if json {
        return print_json(&analyses);
    }

    println!();
    println!("🏷️  Purchase Classification");
    println!("   ─────────────────────────────────────────────────────────────");

    if analyses.is_empty() {
        println!("   No transactions found.");
        return Ok(());
    }

    println!(
        "   {:10} │ {:28} │ {:>10} │ {:>5} │ {:13} │ Reasoning",
        "Date", "Description", "Amount", "Score", "Class"
    );
    println!("   ───────────┼──────────────────────────────┼────────────┼───────┼───────────────┼──────────");

    for a in &analyses {
        let tx = &a.transaction;
        let sign = if tx.is_income() { "+" } else { "-" };
        println!(
            "   {:10} │ {:28} │ {:>10} │ {:>5} │ {} {:10} │ {}",
            tx.day().format("%Y-%m-%d"),
            truncate(&tx.description, 28),
            format!("{}{:.2}", sign, tx.amount),
            a.score,
            classification_icon(a.classification),
            a.classification.as_str(),
            truncate(&a.reasoning, 50),
        );
    }

    if transactions.len() > analyses.len() {
        println!();
        println!(
            "   Showing {} of {} transactions (use --limit to see more)",
            analyses.len(),
            transactions.len()
        );
    }

    Ok(())
}

/// Full insights summary
pub fn cmd_insights(transactions: &[Transaction], now: NaiveDateTime, json: bool) -> Result<()> {
    let insights = analyze_all_purchases(transactions, now);

    if json {
        return print_json(&insights);
    }

    println!();
    println!("💡 Purchase Insights");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   ✅ Good:    {:>4} purchases   ${:>10.2}",
        insights.good_purchases.len(),
        insights.total_good_value
    );
    println!(
        "   ❌ Bad:     {:>4} purchases   ${:>10.2}",
        insights.bad_purchases.len(),
        insights.total_bad_value
    );
    println!("   ➖ Neutral: {:>4} purchases", insights.neutral_purchases.len());
    println!("   Good/bad ratio: {:.2}", insights.good_bad_ratio);

    let mut worst: Vec<&PurchaseAnalysis> = insights
        .bad_purchases
        .iter()
        .filter(|a| a.transaction.is_expense())
        .collect();
    worst.sort_by(|a, b| b.transaction.amount.total_cmp(&a.transaction.amount));
    if !worst.is_empty() {
        println!();
        println!("   Biggest bad purchases:");
        for a in worst.iter().take(5) {
            println!(
                "     ${:>9.2}  {:28}  {}",
                a.transaction.amount,
                truncate(&a.transaction.description, 28),
                a.reasoning
            );
        }
    }

    print_prediction(&insights.monthly_prediction);
    print_trends(&insights.trends);

    Ok(())
}

/// Next month's prediction
pub fn cmd_predict(transactions: &[Transaction], now: NaiveDateTime, json: bool) -> Result<()> {
    let prediction = generate_monthly_prediction(transactions, now);

    if json {
        return print_json(&prediction);
    }

    print_prediction(&prediction);
    Ok(())
}

/// Trend summary
pub fn cmd_trends(transactions: &[Transaction], now: NaiveDateTime, json: bool) -> Result<()> {
    let trends = analyze_all_purchases(transactions, now).trends;

    if json {
        return print_json(&trends);
    }

    print_trends(&trends);
    Ok(())
}

fn print_prediction(prediction: &MonthlyPrediction) {
    let risk = match prediction.risk_level {
        RiskLevel::Low => "🟢 low",
        RiskLevel::Medium => "🟡 medium",
        RiskLevel::High => "🔴 high",
    };

    println!();
    println!("🔮 Prediction for {}", prediction.month);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Estimated spending: ${:.2}", prediction.total_estimated);
    println!("   Risk: {}", risk);

    if !prediction.category_breakdown.is_empty() {
        println!();
        println!(
            "   {:15} │ {:>10} │ {:>10} │ {:>5}",
            "Category", "Estimate", "Trend", "Conf."
        );
        println!("   ────────────────┼────────────┼────────────┼───────");
        for p in &prediction.category_breakdown {
            let trend = match p.trend {
                Trend::Increasing => "↑ up",
                Trend::Decreasing => "↓ down",
                Trend::Stable => "→ stable",
            };
            println!(
                "   {:15} │ {:>10.2} │ {:>10} │ {:>4}%",
                p.category.label(),
                p.estimated,
                trend,
                p.confidence
            );
        }
    }

    println!();
    for recommendation in &prediction.recommendations {
        println!("   💬 {}", recommendation);
    }
}

fn print_trends(trends: &TrendSummary) {
    let pattern = match trends.spending_pattern {
        SpendingPattern::Improving => "📈 improving",
        SpendingPattern::Declining => "📉 declining",
        SpendingPattern::Stable => "➡️  stable",
    };

    println!();
    println!("📊 Spending Trends");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Pattern: {} ({:+.1})", pattern, trends.improvement_score);

    if !trends.risk_areas.is_empty() {
        println!("   Risk areas:");
        for area in &trends.risk_areas {
            println!("     ⚠️  {}", area);
        }
    }
    if !trends.strengths.is_empty() {
        println!("   Strengths:");
        for strength in &trends.strengths {
            println!("     💪 {}", strength);
        }
    }
}
