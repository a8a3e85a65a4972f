//! Calendar month arithmetic
//!
//! The predictor, overview and cash-flow projector all bucket by calendar
//! month rather than by rolling 30-day windows.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Error, Result};

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("Day 1 always valid")
}

/// First day of the month `offset` months away from the month containing `date`
///
/// Negative offsets go back in time.
pub fn shift_month(date: NaiveDate, offset: i32) -> NaiveDate {
    let index = date.year() * 12 + date.month0() as i32 + offset;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).expect("Day 1 always valid")
}

/// Number of days in the month containing `date`
pub fn days_in_month(date: NaiveDate) -> u32 {
    let start = month_start(date);
    let next = shift_month(date, 1);
    (next - start).num_days() as u32
}

/// Whether two dates fall in the same calendar month
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Date with the given day in the month containing `date`, clamped to the
/// last day of shorter months (day 31 in February becomes the 28th or 29th)
pub fn clamp_day(date: NaiveDate, day: u32) -> NaiveDate {
    let day = day.clamp(1, days_in_month(date));
    month_start(date)
        .with_day(day)
        .expect("Day clamped to month length")
}

/// Human-readable month label (e.g., "November 2026")
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Parse a "now" override: `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`
///
/// A bare date means the end of that day, so everything dated that day is
/// already in the past.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(timestamp);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).expect("valid time");
        return Ok(date.and_time(end_of_day));
    }
    Err(Error::InvalidData(format!(
        "Invalid date '{}' (use YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)",
        value
    )))
}
