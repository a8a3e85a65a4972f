//! Purchase scoring rules
//!
//! The classifier walks [`RULES`] in order and applies every adjustment that
//! fires. Score deltas add up; a rule that assigns a purchase category
//! overwrites whatever an earlier rule assigned, so the last matching rule
//! decides the final category.

use std::sync::OnceLock;

use chrono::Timelike;
use regex::Regex;

use crate::models::{Category, Transaction};

use super::types::PurchaseCategory;

/// Description keywords that suggest spending on self-improvement
pub const DEVELOPMENT_KEYWORDS: &[&str] =
    &["book", "course", "education", "gym", "health", "medical"];

/// Description keywords that suggest a recurring charge
pub const SUBSCRIPTION_KEYWORDS: &[&str] = &["subscription", "monthly"];

/// Description keywords that suggest money spent for nothing
pub const WASTE_KEYWORDS: &[&str] = &["cancel", "refund", "unused"];

/// Purchases before this hour count as late night
pub const LATE_NIGHT_BEFORE_HOUR: u32 = 6;

/// Purchases after this hour count as late night
pub const LATE_NIGHT_AFTER_HOUR: u32 = 22;

/// Effect of one rule on a purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjustment {
    pub delta: i32,
    pub tag: Option<&'static str>,
    pub category: Option<PurchaseCategory>,
}

impl Adjustment {
    pub const fn score(delta: i32) -> Self {
        Self {
            delta,
            tag: None,
            category: None,
        }
    }

    pub const fn with_tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    pub const fn with_category(mut self, category: PurchaseCategory) -> Self {
        self.category = Some(category);
        self
    }
}

/// A named predicate-to-effect pair
pub struct Rule {
    pub name: &'static str,
    pub evaluate: fn(&Transaction) -> Option<Adjustment>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Expense scoring rules in evaluation order
pub const RULES: &[Rule] = &[
    Rule {
        name: "essential_category",
        evaluate: essential_category,
    },
    Rule {
        name: "high_food_expense",
        evaluate: high_food_expense,
    },
    Rule {
        name: "high_utility_bill",
        evaluate: high_utility_bill,
    },
    Rule {
        name: "personal_development",
        evaluate: personal_development,
    },
    Rule {
        name: "late_night",
        evaluate: late_night,
    },
    Rule {
        name: "shopping",
        evaluate: shopping,
    },
    Rule {
        name: "entertainment",
        evaluate: entertainment,
    },
    Rule {
        name: "subscription",
        evaluate: subscription,
    },
    Rule {
        name: "amount_tier",
        evaluate: amount_tier,
    },
    Rule {
        name: "cancelled_or_unused",
        evaluate: cancelled_or_unused,
    },
];

/// Look up a rule by name
pub fn rule(name: &str) -> Option<&'static Rule> {
    RULES.iter().find(|r| r.name == name)
}

fn keyword_regex(keywords: &[&str]) -> Regex {
    let alternatives: Vec<String> = keywords.iter().map(|k| regex::escape(k)).collect();
    Regex::new(&format!("(?i){}", alternatives.join("|"))).expect("valid regex")
}

fn development_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| keyword_regex(DEVELOPMENT_KEYWORDS))
}

fn subscription_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| keyword_regex(SUBSCRIPTION_KEYWORDS))
}

fn waste_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| keyword_regex(WASTE_KEYWORDS))
}

fn essential_category(tx: &Transaction) -> Option<Adjustment> {
    tx.category.is_essential().then_some(
        Adjustment::score(30)
            .with_tag("Essential category")
            .with_category(PurchaseCategory::Essential),
    )
}

fn high_food_expense(tx: &Transaction) -> Option<Adjustment> {
    (tx.category == Category::Food && tx.amount > 100.0)
        .then_some(Adjustment::score(-20).with_tag("High food expense"))
}

fn high_utility_bill(tx: &Transaction) -> Option<Adjustment> {
    (tx.category == Category::Utilities && tx.amount > 300.0)
        .then_some(Adjustment::score(-15).with_tag("High utility bill"))
}

fn personal_development(tx: &Transaction) -> Option<Adjustment> {
    development_re().is_match(&tx.description).then_some(
        Adjustment::score(40)
            .with_tag("Investment in personal development")
            .with_category(PurchaseCategory::Investment),
    )
}

fn late_night(tx: &Transaction) -> Option<Adjustment> {
    let hour = tx.date.hour();
    (hour < LATE_NIGHT_BEFORE_HOUR || hour > LATE_NIGHT_AFTER_HOUR).then_some(
        Adjustment::score(-25)
            .with_tag("Late night purchase (potential impulse)")
            .with_category(PurchaseCategory::Impulse),
    )
}

fn shopping(tx: &Transaction) -> Option<Adjustment> {
    if tx.category != Category::Shopping {
        return None;
    }
    if tx.amount > 200.0 {
        Some(
            Adjustment::score(-30)
                .with_tag("Large shopping purchase")
                .with_category(PurchaseCategory::Impulse),
        )
    } else if tx.amount < 50.0 {
        Some(Adjustment::score(10).with_tag("Small shopping purchase"))
    } else {
        None
    }
}

fn entertainment(tx: &Transaction) -> Option<Adjustment> {
    if tx.category != Category::Entertainment {
        return None;
    }
    // Category is forced even when the amount is unremarkable
    let adjustment = if tx.amount > 100.0 {
        Adjustment::score(-20).with_tag("Expensive entertainment")
    } else if tx.amount < 30.0 {
        Adjustment::score(15).with_tag("Affordable entertainment")
    } else {
        Adjustment::score(0)
    };
    Some(adjustment.with_category(PurchaseCategory::Entertainment))
}

fn subscription(tx: &Transaction) -> Option<Adjustment> {
    if !subscription_re().is_match(&tx.description) {
        return None;
    }
    if tx.amount > 50.0 {
        Some(
            Adjustment::score(-15)
                .with_tag("Costly recurring subscription")
                .with_category(PurchaseCategory::Waste),
        )
    } else {
        Some(Adjustment::score(5).with_tag("Affordable subscription"))
    }
}

fn amount_tier(tx: &Transaction) -> Option<Adjustment> {
    if tx.amount > 1000.0 {
        Some(Adjustment::score(-40).with_tag("Very large purchase"))
    } else if tx.amount > 500.0 {
        Some(Adjustment::score(-20).with_tag("Large purchase"))
    } else if tx.amount < 20.0 {
        Some(Adjustment::score(10).with_tag("Small purchase"))
    } else {
        None
    }
}

fn cancelled_or_unused(tx: &Transaction) -> Option<Adjustment> {
    waste_re().is_match(&tx.description).then_some(
        Adjustment::score(-50)
            .with_tag("Cancelled or unused purchase")
            .with_category(PurchaseCategory::Waste),
    )
}
