//! The list of valid authors, with autocomplete lookups.

use crate::{sanitize::escape_html, types::AuthorName};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Fragments shorter than this get no suggestions.
pub const MIN_SUGGESTION_CHARS: usize = 2;

/// Every user name a player may guess. Membership is exact and
/// case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct AuthorRoster {
    names: Vec<AuthorName>,
    index: HashSet<AuthorName>,
}

/// One autocomplete entry: `label` is safe to insert as markup,
/// `value` is what ends up in the input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub label: String,
    pub value: AuthorName,
}

impl AuthorRoster {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<AuthorName>,
    {
        let mut roster = Self::default();
        for name in names {
            let name = name.into();
            if roster.index.insert(name.clone()) {
                roster.names.push(name);
            }
        }
        roster
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[AuthorName] {
        &self.names
    }

    /// Names containing `fragment` (case-insensitive), shortest first,
    /// then alphabetical. At most `limit` entries, and nothing until the
    /// fragment has `MIN_SUGGESTION_CHARS` characters.
    pub fn suggest(&self, fragment: &str, limit: usize) -> Vec<Suggestion> {
        let needle = fragment.trim().to_lowercase();
        if needle.chars().count() < MIN_SUGGESTION_CHARS {
            return Vec::new();
        }

        let mut hits: Vec<&AuthorName> = self
            .names
            .iter()
            .filter(|n| n.to_lowercase().contains(&needle))
            .collect();
        hits.sort_by(|a, b| a.chars().count().cmp(&b.chars().count()).then_with(|| a.cmp(b)));

        hits.into_iter()
            .take(limit)
            .map(|n| Suggestion { label: escape_html(n), value: n.clone() })
            .collect()
    }
}

impl<'de> Deserialize<'de> for AuthorRoster {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let names = Vec::<AuthorName>::deserialize(deserializer)?;
        Ok(Self::new(names))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> AuthorRoster {
        AuthorRoster::new(["Alice", "alfred", "Bob", "Malina", "Al", "<Ali>"])
    }

    #[test]
    fn membership_is_exact() {
        let r = roster();
        assert!(r.contains("Alice"));
        assert!(!r.contains("alice"));
        assert!(!r.contains("Alice "));
        assert!(!r.contains(""));
    }

    #[test]
    fn duplicates_are_collapsed() {
        let r = AuthorRoster::new(["a", "b", "a"]);
        assert_eq!(r.len(), 2);
        assert_eq!(r.names(), ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn suggestions_match_substrings_ignoring_case() {
        let values: Vec<String> = roster()
            .suggest("AL", 15)
            .into_iter()
            .map(|s| s.value)
            .collect();
        assert_eq!(values, ["Al", "<Ali>", "Alice", "Malina", "alfred"]);
    }

    #[test]
    fn suggestions_respect_limit_and_escape_labels() {
        let hits = roster().suggest("al", 2);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[1].label, "&lt;Ali&gt;");
        assert_eq!(hits[1].value, "<Ali>");
    }

    #[test]
    fn blank_fragment_suggests_nothing() {
        assert!(roster().suggest("  ", 15).is_empty());
    }

    #[test]
    fn single_character_suggests_nothing() {
        assert!(roster().suggest("a", 15).is_empty());
        assert!(roster().suggest(" a ", 15).is_empty());
        assert_eq!(roster().suggest("bo", 15).len(), 1);
    }
}
