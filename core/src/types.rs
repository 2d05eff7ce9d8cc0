//! Shared primitive types used across the entire game.

use chrono::NaiveDate;

/// An ISO calendar date, `YYYY-MM-DD`. Keys both the puzzle collection
/// and the stored games.
pub type DateKey = String;

/// A forum user name as it appears in the author list.
pub type AuthorName = String;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a calendar date as a storage/collection key.
pub fn date_key(date: NaiveDate) -> DateKey {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a collection/storage key back into a date. Only the canonical,
/// zero-padded form is accepted, so parsed keys always round-trip.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_FORMAT)
        .ok()
        .filter(|date| date_key(*date) == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_canonical_keys_parse() {
        assert_eq!(parse_date_key("2024-05-01"), NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(parse_date_key("2024-5-1"), None);
        assert_eq!(parse_date_key("2024-02-30"), None);
        assert_eq!(parse_date_key("today"), None);
    }
}
