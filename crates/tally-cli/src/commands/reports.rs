//! Report command implementations

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use tally_core::insights::{project_cash_flow, ProjectionOptions};
use tally_core::{summarize_month, Transaction};

use super::print_json;

/// Apply command-line overrides to the configured projection options
pub fn projection_options(
    base: &ProjectionOptions,
    days: Option<u32>,
    balance: Option<f64>,
    window: Option<u32>,
) -> Result<ProjectionOptions> {
    let mut options = base.clone();
    if let Some(days) = days {
        options.days = days;
    }
    if let Some(balance) = balance {
        options.starting_balance = balance;
    }
    if let Some(window) = window {
        options.window_days = window;
    }
    options
        .validate()
        .context("Invalid projection options")?;
    Ok(options)
}

pub fn cmd_overview(transactions: &[Transaction], now: NaiveDateTime, json: bool) -> Result<()> {
    let overview = summarize_month(transactions, now);

    if json {
        return print_json(&overview);
    }

    println!();
    println!("📅 {}", overview.month);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Income:      ${:>10.2}", overview.total_income);
    println!("   Expenses:    ${:>10.2}", overview.total_expenses);
    println!("   Net:         ${:>10.2}", overview.net_cash_flow);
    println!("   Savings rate: {:>9.1}%", overview.savings_rate);
    println!("   Transactions: {}", overview.transaction_count);

    match overview.expense_change_percent {
        Some(change) if change > 0.0 => println!(
            "   📈 Spending up {:.1}% vs last month (${:.2})",
            change, overview.previous_month_expenses
        ),
        Some(change) => println!(
            "   📉 Spending down {:.1}% vs last month (${:.2})",
            change.abs(),
            overview.previous_month_expenses
        ),
        None => println!("   No spending last month to compare against"),
    }

    if overview.spending_by_category.is_empty() {
        println!();
        println!("   No spending found this month.");
        return Ok(());
    }

    println!();
    println!(
        "   {:15} │ {:>10} │ {:>6} │ {:>5}",
        "Category", "Amount", "%", "Count"
    );
    println!("   ────────────────┼────────────┼────────┼───────");
    for c in &overview.spending_by_category {
        println!(
            "   {:15} │ {:>10.2} │ {:>5.1}% │ {:>5}",
            c.category.label(),
            c.amount,
            c.percentage,
            c.transaction_count
        );
    }

    Ok(())
}

pub fn cmd_projection(
    transactions: &[Transaction],
    options: &ProjectionOptions,
    now: NaiveDateTime,
    json: bool,
) -> Result<()> {
    let projection = project_cash_flow(transactions, options, now);

    if json {
        return print_json(&projection);
    }

    println!();
    println!("💸 Cash-Flow Projection ({} days)", options.days);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Starting balance: ${:.2}", projection.starting_balance);
    println!(
        "   Daily average:    +${:.2} / -${:.2} ({}-day window)",
        projection.average_daily_income, projection.average_daily_expense, options.window_days
    );

    if projection.points.is_empty() {
        println!("   Nothing to project.");
        return Ok(());
    }

    println!();
    println!(
        "   {:10} │ {:>10} │ {:>10} │ {:>12}",
        "Date", "Income", "Expenses", "Balance"
    );
    println!("   ───────────┼────────────┼────────────┼─────────────");
    for p in &projection.points {
        let marker = if p.balance < 0.0 { " ⚠️" } else { "" };
        println!(
            "   {:10} │ {:>10.2} │ {:>10.2} │ {:>12.2}{}",
            p.date.format("%Y-%m-%d"),
            p.income,
            p.expenses,
            p.balance,
            marker
        );
    }

    println!();
    println!("   Ending balance: ${:.2}", projection.ending_balance);
    if let Some(date) = projection.lowest_balance_date {
        println!(
            "   Lowest balance: ${:.2} on {}",
            projection.lowest_balance, date
        );
    }

    Ok(())
}
