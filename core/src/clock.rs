//! Game clock — decides which calendar day "today" is.
//!
//! RULE: Nothing in the game reads the system time directly.
//! Puzzle selection takes a `Clock` so tests can pin the date.

use chrono::{NaiveDate, Utc};

pub trait Clock {
    /// Today's calendar date, normalized to UTC.
    fn today(&self) -> NaiveDate;
}

/// The wall clock. A new puzzle starts at midnight UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A clock stuck on one day. Used in tests and by `postle --date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    pub date: NaiveDate,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_its_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(FixedClock::new(date).today(), date);
    }
}
