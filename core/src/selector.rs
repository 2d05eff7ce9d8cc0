//! Daily puzzle selection.

use crate::{
    clock::Clock,
    error::{PostleError, PostleResult},
    posting::Posting,
    types::{date_key, parse_date_key, DateKey},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// All scheduled postings, keyed by the ISO date they are played on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PuzzleCollection {
    by_date: BTreeMap<DateKey, Posting>,
}

/// The posting picked for one day.
#[derive(Debug, Clone, Copy)]
pub struct Puzzle<'a> {
    pub date:    &'a str,
    pub posting: &'a Posting,
}

impl PuzzleCollection {
    /// Parse the collection and reject keys that are not `YYYY-MM-DD`.
    pub fn from_json(json: &str) -> PostleResult<Self> {
        let collection: PuzzleCollection = serde_json::from_str(json)?;
        if let Some(key) = collection.by_date.keys().find(|k| parse_date_key(k).is_none()) {
            return Err(PostleError::InvalidDate { key: key.clone() });
        }
        Ok(collection)
    }

    pub fn insert(&mut self, date: NaiveDate, posting: Posting) {
        self.by_date.insert(date_key(date), posting);
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }

    /// Today's puzzle according to `clock`.
    pub fn select_today(&self, clock: &dyn Clock) -> PostleResult<Puzzle<'_>> {
        self.select_date(clock.today())
    }

    pub fn select_date(&self, date: NaiveDate) -> PostleResult<Puzzle<'_>> {
        let key = date_key(date);
        match self.by_date.get_key_value(&key) {
            Some((date, posting)) => Ok(Puzzle { date: date.as_str(), posting }),
            None => Err(PostleError::PuzzleNotFound { date: key }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn posting(author: &str) -> Posting {
        Posting {
            author:       author.into(),
            status:       String::new(),
            published_at: String::new(),
            upvotes:      None,
            downvotes:    None,
            title:        String::new(),
            body:         String::new(),
            permalink:    None,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn selects_the_posting_for_the_clock_date() {
        let mut c = PuzzleCollection::default();
        c.insert(day(1), posting("alice"));
        c.insert(day(2), posting("bob"));

        let puzzle = c.select_today(&FixedClock::new(day(2))).unwrap();
        assert_eq!(puzzle.date, "2024-05-02");
        assert_eq!(puzzle.posting.author, "bob");
    }

    #[test]
    fn missing_day_is_puzzle_not_found() {
        let mut c = PuzzleCollection::default();
        c.insert(day(1), posting("alice"));

        match c.select_today(&FixedClock::new(day(3))) {
            Err(PostleError::PuzzleNotFound { date }) => assert_eq!(date, "2024-05-03"),
            other => panic!("expected PuzzleNotFound, got {other:?}"),
        }
    }

    #[test]
    fn from_json_rejects_malformed_dates() {
        let ok = r#"{"2024-05-01": {"user": "alice"}}"#;
        assert_eq!(PuzzleCollection::from_json(ok).unwrap().len(), 1);

        let bad = r#"{"01.05.2024": {"user": "alice"}}"#;
        assert!(matches!(
            PuzzleCollection::from_json(bad),
            Err(PostleError::InvalidDate { .. })
        ));
    }
}
