//! Cash-flow projector
//!
//! Projects a day-by-day balance from:
//! - Moving averages of non-recurring income and spending over a trailing window
//! - Recurring transactions replayed monthly on their usual day

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::clamp_day;
use crate::error::{Error, Result};
use crate::models::{Transaction, TransactionType};
use crate::round_cents;

/// Longest projection horizon
pub const MAX_PROJECTION_DAYS: u32 = 366;

/// Longest trailing window for the moving averages (ten years)
pub const MAX_WINDOW_DAYS: u32 = 3650;

/// Knobs for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionOptions {
    /// Balance at the start of the projection
    pub starting_balance: f64,
    /// Number of days to project after today
    pub days: u32,
    /// Trailing window for the moving averages
    pub window_days: u32,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            starting_balance: 0.0,
            days: 30,
            window_days: 90,
        }
    }
}

impl ProjectionOptions {
    /// Check the horizon and window against their limits
    pub fn validate(&self) -> Result<()> {
        if self.days > MAX_PROJECTION_DAYS {
            return Err(Error::InvalidData(format!(
                "days must be at most {}",
                MAX_PROJECTION_DAYS
            )));
        }
        if self.window_days == 0 || self.window_days > MAX_WINDOW_DAYS {
            return Err(Error::InvalidData(format!(
                "window_days must be between 1 and {}",
                MAX_WINDOW_DAYS
            )));
        }
        if !self.starting_balance.is_finite() {
            return Err(Error::InvalidData(
                "starting_balance must be a finite number".to_string(),
            ));
        }
        Ok(())
    }
}

/// One projected day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowPoint {
    pub date: NaiveDate,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowProjection {
    pub starting_balance: f64,
    pub average_daily_income: f64,
    pub average_daily_expense: f64,
    pub points: Vec<CashFlowPoint>,
    pub ending_balance: f64,
    pub lowest_balance: f64,
    /// None when no days were projected
    pub lowest_balance_date: Option<NaiveDate>,
}

/// A recurring charge or deposit, keyed by its latest occurrence
#[derive(Debug, Clone, Copy)]
struct RecurringSeries {
    transaction_type: TransactionType,
    amount: f64,
    day: u32,
    last_seen: NaiveDateTime,
}

impl RecurringSeries {
    fn is_due(&self, date: NaiveDate) -> bool {
        clamp_day(date, self.day) == date
    }
}

/// Project the balance for the days following `now`
///
/// Out-of-range options are clamped to `MAX_WINDOW_DAYS` and
/// `MAX_PROJECTION_DAYS`; call [`ProjectionOptions::validate`] to reject them.
pub fn project_cash_flow(
    transactions: &[Transaction],
    options: &ProjectionOptions,
    now: NaiveDateTime,
) -> CashFlowProjection {
    let window_days = options.window_days.clamp(1, MAX_WINDOW_DAYS);
    let horizon = options.days.min(MAX_PROJECTION_DAYS);
    let window_start = now
        .checked_sub_signed(Duration::days(i64::from(window_days)))
        .unwrap_or(NaiveDateTime::MIN);

    let history: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.date > window_start && t.date <= now)
        .collect();

    let variable_total = |transaction_type: TransactionType| -> f64 {
        history
            .iter()
            .filter(|t| !t.is_recurring && t.transaction_type == transaction_type)
            .map(|t| t.amount)
            .sum()
    };
    let average_daily_income = variable_total(TransactionType::Income) / f64::from(window_days);
    let average_daily_expense = variable_total(TransactionType::Expense) / f64::from(window_days);

    let series = recurring_series(&history);

    let today = now.date();
    let mut balance = options.starting_balance;
    let mut points = Vec::with_capacity(horizon as usize);

    for offset in 1..=i64::from(horizon) {
        let Some(date) = today.checked_add_signed(Duration::days(offset)) else {
            break;
        };

        let mut income = average_daily_income;
        let mut expenses = average_daily_expense;
        for s in series.iter().filter(|s| s.is_due(date)) {
            match s.transaction_type {
                TransactionType::Income => income += s.amount,
                TransactionType::Expense => expenses += s.amount,
            }
        }

        let income = round_cents(income);
        let expenses = round_cents(expenses);
        let net = round_cents(income - expenses);
        balance = round_cents(balance + net);

        points.push(CashFlowPoint {
            date,
            income,
            expenses,
            net,
            balance,
        });
    }

    let lowest = points
        .iter()
        .min_by(|a, b| a.balance.total_cmp(&b.balance));
    let (lowest_balance, lowest_balance_date) = match lowest {
        Some(p) => (p.balance, Some(p.date)),
        None => (options.starting_balance, None),
    };

    debug!(
        days = points.len(),
        recurring = series.len(),
        average_daily_income,
        average_daily_expense,
        ending_balance = balance,
        "Cash-flow projection generated"
    );

    CashFlowProjection {
        starting_balance: options.starting_balance,
        average_daily_income: round_cents(average_daily_income),
        average_daily_expense: round_cents(average_daily_expense),
        points,
        ending_balance: balance,
        lowest_balance,
        lowest_balance_date,
    }
}

/// Group recurring transactions by description and direction, keeping the
/// latest occurrence of each
fn recurring_series(history: &[&Transaction]) -> Vec<RecurringSeries> {
    let mut latest: BTreeMap<(String, &'static str), RecurringSeries> = BTreeMap::new();

    for tx in history.iter().filter(|t| t.is_recurring) {
        let key = (
            tx.description.to_lowercase(),
            tx.transaction_type.as_str(),
        );
        let candidate = RecurringSeries {
            transaction_type: tx.transaction_type,
            amount: tx.amount,
            day: tx.date.day(),
            last_seen: tx.date,
        };
        latest
            .entry(key)
            .and_modify(|existing| {
                if candidate.last_seen > existing.last_seen {
                    *existing = candidate;
                }
            })
            .or_insert(candidate);
    }

    latest.into_values().collect()
}
