//! Period filtering of ledger transactions

use chrono::{Datelike, Duration, NaiveDate};

use crate::types::{Period, Transaction};

impl Period {
    /// Whether `date` falls inside this period as seen from `reference`
    pub fn contains(&self, date: NaiveDate, reference: NaiveDate) -> bool {
        match self {
            Period::Day => date == reference,
            // Trailing window of seven calendar days, today included; open below the calendar's start
            Period::Week => reference
                .checked_sub_signed(Duration::days(6))
                .map_or(true, |start| date >= start),
            Period::Month => date.year() == reference.year() && date.month() == reference.month(),
            Period::Year => date.year() == reference.year(),
            Period::All => true,
        }
    }
}

/// Select the transactions inside `period`, keeping their input order
pub fn filter_by_period(
    transactions: &[Transaction],
    period: Period,
    reference: NaiveDate,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| period.contains(t.date, reference))
        .cloned()
        .collect()
}
