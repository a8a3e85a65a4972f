//! Demo dataset
//!
//! Generates a believable household's transactions for the current and three
//! previous months so the dashboard has something to show without real data.
//! Output depends only on `now`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::calendar::{clamp_day, shift_month};
use crate::models::{Category, Transaction, TransactionType};
use crate::round_cents;

/// Months of history before the current month
pub const HISTORY_MONTHS: i32 = 3;

const CHECKING: &str = "checking-001";
const CREDIT: &str = "credit-001";

/// Which months a template appears in
#[derive(Clone, Copy)]
enum Cadence {
    Monthly,
    /// Months with an even offset from the current month
    EvenMonths,
    /// Months with an odd offset from the current month
    OddMonths,
    /// Only the given number of months ago
    Once(i32),
}

impl Cadence {
    fn applies(&self, months_ago: i32) -> bool {
        match self {
            Self::Monthly => true,
            Self::EvenMonths => months_ago % 2 == 0,
            Self::OddMonths => months_ago % 2 == 1,
            Self::Once(n) => *n == months_ago,
        }
    }
}

struct Template {
    days: &'static [u32],
    hour: u32,
    amount: f64,
    description: &'static str,
    merchant: &'static str,
    category: Category,
    kind: TransactionType,
    recurring: bool,
    /// Monthly growth applied to older-to-newer months
    growth: f64,
    cadence: Cadence,
}

const fn spend(
    days: &'static [u32],
    hour: u32,
    amount: f64,
    description: &'static str,
    merchant: &'static str,
    category: Category,
) -> Template {
    Template {
        days,
        hour,
        amount,
        description,
        merchant,
        category,
        kind: TransactionType::Expense,
        recurring: false,
        growth: 0.0,
        cadence: Cadence::Monthly,
    }
}

impl Template {
    const fn recurring(mut self) -> Self {
        self.recurring = true;
        self
    }

    const fn income(mut self) -> Self {
        self.kind = TransactionType::Income;
        self
    }

    const fn growing(mut self, growth: f64) -> Self {
        self.growth = growth;
        self
    }

    const fn cadence(mut self, cadence: Cadence) -> Self {
        self.cadence = cadence;
        self
    }
}

const TEMPLATES: &[Template] = &[
    spend(&[1], 9, 3200.0, "Acme Corp Payroll 1/2", "Acme Corp", Category::Income)
        .income()
        .recurring(),
    spend(&[15], 9, 3200.0, "Acme Corp Payroll 2/2", "Acme Corp", Category::Income)
        .income()
        .recurring(),
    spend(&[18], 14, 450.0, "Freelance design invoice", "Studio Nine", Category::Income)
        .income()
        .cadence(Cadence::OddMonths),
    spend(&[1], 8, 1850.0, "Maple Street Apartments Rent", "Maple Street Apartments", Category::Housing)
        .recurring(),
    spend(&[5], 10, 142.3, "City Power & Light", "City Power & Light", Category::Utilities)
        .recurring(),
    spend(&[12], 10, 64.99, "Fiber Internet", "Fiber Co", Category::Utilities).recurring(),
    spend(&[8], 7, 15.99, "StreamFlix Monthly Subscription", "StreamFlix", Category::Entertainment)
        .recurring(),
    spend(&[3], 6, 45.0, "Iron Temple Gym Membership", "Iron Temple", Category::Healthcare)
        .recurring(),
    spend(&[27], 10, 24.99, "Cloud Storage Monthly", "CloudBox", Category::Other).recurring(),
    spend(&[4, 11, 18, 25], 17, 86.4, "FreshMart Groceries", "FreshMart", Category::Food)
        .growing(0.06),
    spend(&[6, 20], 12, 48.0, "Metro Transit Pass Reload", "Metro Transit", Category::Transportation),
    spend(&[14], 16, 52.75, "QuickFuel Gas Station", "QuickFuel", Category::Transportation),
    spend(&[9, 22], 19, 64.5, "Luigi's Trattoria", "Luigi's Trattoria", Category::Food)
        .growing(0.1),
    spend(&[2, 16, 29], 8, 6.75, "Daily Grind Coffee", "Daily Grind", Category::Food),
    spend(&[13], 23, 129.99, "Late Night Gadgets Online", "GadgetHub", Category::Shopping)
        .growing(0.15),
    spend(&[16], 14, 34.99, "Page Turner Books", "Page Turner", Category::Shopping),
    spend(&[21], 20, 58.0, "Cineplex Tickets", "Cineplex", Category::Entertainment),
    spend(&[23], 11, 35.0, "Corner Pharmacy", "Corner Pharmacy", Category::Healthcare),
    spend(&[26], 15, 649.0, "Electronics Superstore", "Electronics Superstore", Category::Shopping)
        .cadence(Cadence::EvenMonths),
    spend(&[19], 21, 240.0, "Weekend Concert Tickets", "TicketWave", Category::Entertainment)
        .cadence(Cadence::Once(1)),
    spend(&[24], 13, 25.0, "Cancelled yoga class fee", "Lotus Studio", Category::Other)
        .cadence(Cadence::Once(2)),
    spend(&[10], 12, 89.0, "Online course: personal finance", "LearnHub", Category::Other)
        .cadence(Cadence::Once(0)),
];

/// Build the demo dataset, sorted by date, with nothing after `now`
pub fn generate(now: NaiveDateTime) -> Vec<Transaction> {
    let today = now.date();
    let mut transactions = Vec::new();

    for months_ago in (0..=HISTORY_MONTHS).rev() {
        let month = shift_month(today, -months_ago);
        // 0 for the oldest month, HISTORY_MONTHS for the current one
        let age = f64::from(HISTORY_MONTHS - months_ago);

        for (index, template) in TEMPLATES.iter().enumerate() {
            if !template.cadence.applies(months_ago) {
                continue;
            }

            for &day in template.days {
                let date = at(clamp_day(month, day), template.hour);
                if date > now {
                    continue;
                }

                let amount = if template.recurring {
                    template.amount
                } else {
                    round_cents(
                        template.amount * (1.0 + template.growth * age) * jitter(index, months_ago, day),
                    )
                };

                transactions.push(Transaction {
                    id: String::new(),
                    account_id: account_for(template).to_string(),
                    amount,
                    description: template.description.to_string(),
                    category: template.category,
                    date,
                    transaction_type: template.kind,
                    merchant: Some(template.merchant.to_string()),
                    location: None,
                    is_recurring: template.recurring,
                    tags: if template.recurring {
                        vec!["recurring".to_string()]
                    } else {
                        vec![]
                    },
                });
            }
        }
    }

    transactions.sort_by(|a, b| a.date.cmp(&b.date));
    for (n, tx) in transactions.iter_mut().enumerate() {
        tx.id = format!("txn-{:04}", n + 1);
    }
    transactions
}

fn at(date: NaiveDate, hour: u32) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default())
}

/// Deterministic +/-8% variation so months don't look copy-pasted
fn jitter(index: usize, months_ago: i32, day: u32) -> f64 {
    let seed = index as i64 * 7 + i64::from(months_ago) * 13 + i64::from(day) * 3;
    let step = seed.rem_euclid(5) - 2;
    1.0 + step as f64 * 0.04
}

fn account_for(template: &Template) -> &'static str {
    match (template.kind, template.recurring) {
        (TransactionType::Income, _) | (_, true) => CHECKING,
        _ => CREDIT,
    }
}
