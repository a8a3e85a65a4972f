//! Dashboard overview cards for the current calendar month

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::calendar::{month_label, same_month, shift_month};
use crate::models::{Category, Transaction};
use crate::round_cents;

/// Spending in one category for the month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: f64,
    /// Share of the month's expenses (0-100)
    pub percentage: f64,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialOverview {
    pub month: String,
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_cash_flow: f64,
    /// Net as a percentage of income, 0 with no income
    pub savings_rate: f64,
    pub transaction_count: usize,
    /// Sorted by amount, largest first
    pub spending_by_category: Vec<CategoryTotal>,
    pub previous_month_expenses: f64,
    /// None when there were no expenses last month
    pub expense_change_percent: Option<f64>,
}

/// Summarize the month containing `now`
pub fn summarize_month(transactions: &[Transaction], now: NaiveDateTime) -> FinancialOverview {
    let today = now.date();
    let previous = shift_month(today, -1);

    let this_month: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| same_month(t.day(), today))
        .collect();

    let total_income: f64 = this_month
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum();
    let total_expenses: f64 = this_month
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .sum();
    let net_cash_flow = total_income - total_expenses;

    let savings_rate = if total_income > 0.0 {
        net_cash_flow / total_income * 100.0
    } else {
        0.0
    };

    let mut by_category: BTreeMap<Category, (f64, usize)> = BTreeMap::new();
    for tx in this_month.iter().filter(|t| t.is_expense()) {
        let entry = by_category.entry(tx.category).or_default();
        entry.0 += tx.amount;
        entry.1 += 1;
    }

    let mut spending_by_category: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(category, (amount, transaction_count))| CategoryTotal {
            category,
            amount: round_cents(amount),
            percentage: if total_expenses > 0.0 {
                round_cents(amount / total_expenses * 100.0)
            } else {
                0.0
            },
            transaction_count,
        })
        .collect();
    spending_by_category.sort_by(|a, b| b.amount.total_cmp(&a.amount));

    let previous_month_expenses: f64 = transactions
        .iter()
        .filter(|t| t.is_expense() && same_month(t.day(), previous))
        .map(|t| t.amount)
        .sum();

    let expense_change_percent = (previous_month_expenses > 0.0).then(|| {
        round_cents((total_expenses - previous_month_expenses) / previous_month_expenses * 100.0)
    });

    FinancialOverview {
        month: month_label(today),
        total_income: round_cents(total_income),
        total_expenses: round_cents(total_expenses),
        net_cash_flow: round_cents(net_cash_flow),
        savings_rate: round_cents(savings_rate),
        transaction_count: this_month.len(),
        spending_by_category,
        previous_month_expenses: round_cents(previous_month_expenses),
        expense_change_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{at, expense, income};

    #[test]
    fn test_empty_month() {
        let overview = summarize_month(&[], at(2026, 6, 15, 12));

        assert_eq!(overview.month, "June 2026");
        assert_eq!(overview.total_income, 0.0);
        assert_eq!(overview.savings_rate, 0.0);
        assert!(overview.spending_by_category.is_empty());
        assert_eq!(overview.expense_change_percent, None);
    }

    #[test]
    fn test_month_summary() {
        let txs = vec![
            income(4000.0).on_day(2026, 6, 1),
            expense(1500.0, Category::Housing).on_day(2026, 6, 1),
            expense(300.0, Category::Food).on_day(2026, 6, 5),
            expense(200.0, Category::Food).on_day(2026, 6, 12),
            // Last month
            expense(1600.0, Category::Housing).on_day(2026, 5, 1),
            // Next year, same month number
            expense(999.0, Category::Shopping).on_day(2027, 6, 1),
        ];

        let overview = summarize_month(&txs, at(2026, 6, 15, 12));

        assert_eq!(overview.total_income, 4000.0);
        assert_eq!(overview.total_expenses, 2000.0);
        assert_eq!(overview.net_cash_flow, 2000.0);
        assert_eq!(overview.savings_rate, 50.0);
        assert_eq!(overview.transaction_count, 4);

        assert_eq!(overview.spending_by_category.len(), 2);
        let housing = &overview.spending_by_category[0];
        assert_eq!(housing.category, Category::Housing);
        assert_eq!(housing.percentage, 75.0);
        let food = &overview.spending_by_category[1];
        assert_eq!(food.amount, 500.0);
        assert_eq!(food.transaction_count, 2);

        assert_eq!(overview.previous_month_expenses, 1600.0);
        assert_eq!(overview.expense_change_percent, Some(25.0));
    }
}
