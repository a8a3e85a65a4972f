//! Test utilities: transaction builders
//!
//! Available to this crate's unit tests and, with the `test-utils` feature,
//! to the CLI and server test suites.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::{Category, Transaction, TransactionType};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Default timestamp for test transactions (midday, so no late-night penalty)
pub fn default_date() -> NaiveDateTime {
    at(2026, 6, 15, 12)
}

/// Build a local timestamp
pub fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn transaction(amount: f64, category: Category, transaction_type: TransactionType) -> Transaction {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    Transaction {
        id: format!("test-{}", n),
        account_id: "test-account".to_string(),
        amount,
        description: "Test purchase".to_string(),
        category,
        date: default_date(),
        transaction_type,
        merchant: None,
        location: None,
        is_recurring: false,
        tags: vec![],
    }
}

/// An expense at midday on the default date
pub fn expense(amount: f64, category: Category) -> Transaction {
    transaction(amount, category, TransactionType::Expense)
}

/// An income transaction at midday on the default date
pub fn income(amount: f64) -> Transaction {
    transaction(amount, Category::Income, TransactionType::Income).with_description("Paycheck")
}

impl Transaction {
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn on(mut self, date: NaiveDateTime) -> Self {
        self.date = date;
        self
    }

    pub fn on_day(self, year: i32, month: u32, day: u32) -> Self {
        self.on(at(year, month, day, 12))
    }

    pub fn at_hour(mut self, hour: u32) -> Self {
        let time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap();
        self.date = self.date.date().and_time(time);
        self
    }

    pub fn recurring(mut self) -> Self {
        self.is_recurring = true;
        self
    }
}
