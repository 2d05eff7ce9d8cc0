//! Forum postings and their displayable fields.

use crate::types::AuthorName;
use serde::{Deserialize, Serialize};

/// One forum posting as delivered by the data files.
/// Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    #[serde(alias = "user", alias = "username")]
    pub author: AuthorName,
    #[serde(default)]
    pub status: String,
    #[serde(default, alias = "published")]
    pub published_at: String,
    #[serde(default)]
    pub upvotes: Option<u32>,
    #[serde(default)]
    pub downvotes: Option<u32>,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "message")]
    pub body: String,
    #[serde(default, alias = "href", skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
}

impl Posting {
    /// The fields that may be shown while the author is still a secret.
    /// The permalink is dropped as well, it leads straight to the author.
    pub fn redacted(&self) -> PostingFields {
        PostingFields {
            author: None,
            permalink: None,
            ..PostingFields::from(self)
        }
    }
}

/// A partial view of a posting. Absent fields are not rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingFields {
    pub author: Option<String>,
    pub status: Option<String>,
    pub published_at: Option<String>,
    pub upvotes: Option<u32>,
    pub downvotes: Option<u32>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub permalink: Option<String>,
}

impl PostingFields {
    /// `"{downvotes} 🟥 🟩 {upvotes}"`, or `None` if neither count is known.
    pub fn rating(&self) -> Option<String> {
        if self.upvotes.is_none() && self.downvotes.is_none() {
            return None;
        }
        Some(format!(
            "{} 🟥 🟩 {}",
            self.downvotes.unwrap_or(0),
            self.upvotes.unwrap_or(0)
        ))
    }
}

impl From<&Posting> for PostingFields {
    fn from(p: &Posting) -> Self {
        Self {
            author:       Some(p.author.clone()),
            status:       Some(p.status.clone()),
            published_at: Some(p.published_at.clone()),
            upvotes:      p.upvotes,
            downvotes:    p.downvotes,
            title:        Some(p.title.clone()),
            body:         Some(p.body.clone()),
            permalink:    p.permalink.clone(),
        }
    }
}

/// Permalink for a posting in a live ticker.
pub fn ticker_link(ticker_id: &str, thread_id: &str, posting_id: &str) -> String {
    format!("https://derstandard.at/jetzt/livebericht/{ticker_id}/{thread_id}/{posting_id}")
}

/// Permalink for a posting in an article forum.
pub fn forum_link(article_id: &str, posting_id: &str) -> String {
    format!("https://www.derstandard.at/story/{article_id}#posting-{posting_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Posting {
        Posting {
            author:       "alice".into(),
            status:       "Stammposterin".into(),
            published_at: "12. März 2024, 08:15:00".into(),
            upvotes:      Some(12),
            downvotes:    Some(3),
            title:        "Titel".into(),
            body:         "Text".into(),
            permalink:    Some(forum_link("3000000201", "1234")),
        }
    }

    #[test]
    fn redacted_fields_hide_author_and_link() {
        let fields = sample().redacted();
        assert_eq!(fields.author, None);
        assert_eq!(fields.permalink, None);
        assert_eq!(fields.title.as_deref(), Some("Titel"));
        assert_eq!(fields.upvotes, Some(12));
    }

    #[test]
    fn rating_defaults_missing_counts_to_zero() {
        let fields = PostingFields { upvotes: Some(3), ..Default::default() };
        assert_eq!(fields.rating().as_deref(), Some("0 🟥 🟩 3"));

        let fields = PostingFields { downvotes: Some(4), ..Default::default() };
        assert_eq!(fields.rating().as_deref(), Some("4 🟥 🟩 0"));

        assert_eq!(PostingFields::default().rating(), None);
    }

    #[test]
    fn parses_data_file_keys() {
        let json = r#"{
            "user": "bob",
            "status": "",
            "published": "1. Jänner 2024",
            "upvotes": 3,
            "title": "Hallo",
            "message": "Zeile 1\nZeile 2",
            "href": "https://example.invalid/p/1"
        }"#;
        let p: Posting = serde_json::from_str(json).unwrap();
        assert_eq!(p.author, "bob");
        assert_eq!(p.published_at, "1. Jänner 2024");
        assert_eq!(p.upvotes, Some(3));
        assert_eq!(p.downvotes, None);
        assert_eq!(p.body, "Zeile 1\nZeile 2");
        assert_eq!(p.permalink.as_deref(), Some("https://example.invalid/p/1"));
    }

    #[test]
    fn permalink_builders() {
        assert_eq!(
            ticker_link("100", "200", "300"),
            "https://derstandard.at/jetzt/livebericht/100/200/300"
        );
        assert_eq!(
            forum_link("3000000201", "1234"),
            "https://www.derstandard.at/story/3000000201#posting-1234"
        );
    }
}
