use serde::{Deserialize, Serialize};

use crate::domain::RawEntry;
use crate::text;

/// The normalized, sanitized record stored in a feed's history.
///
/// Articles are immutable once built; merging only decides whether a record
/// enters the history and where it sorts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub summary: String,
    pub published: String,
    pub fetch_time: String,
}

impl Article {
    /// Normalize one raw feed entry. Missing fields degrade to defaults;
    /// this never fails.
    ///
    /// The fetch timestamp is supplied by the caller so that one refresh
    /// stamps every article identically.
    pub fn from_raw(raw: RawEntry, fetch_time: &str, max_summary: usize) -> Self {
        let title = raw
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| "(untitled)".to_string());

        let link = raw.link.unwrap_or_default();

        let summary = raw
            .summary
            .or(raw.description)
            .map(|s| text::truncate(&text::sanitize(&s), max_summary))
            .unwrap_or_default();

        let published = raw
            .published
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "unknown".to_string());

        Self {
            title,
            link,
            summary,
            published,
            fetch_time: fetch_time.to_string(),
        }
    }

    /// Dedup identity: the link, or the title for link-less entries.
    pub fn identity(&self) -> &str {
        if self.link.is_empty() {
            &self.title
        } else {
            &self.link
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_degrade_to_defaults() {
        let article = Article::from_raw(RawEntry::default(), "2024-03-01T08:00:00+00:00", 200);

        assert_eq!(article.title, "(untitled)");
        assert_eq!(article.link, "");
        assert_eq!(article.summary, "");
        assert_eq!(article.published, "unknown");
        assert_eq!(article.fetch_time, "2024-03-01T08:00:00+00:00");
    }

    #[test]
    fn test_whitespace_only_title_is_untitled() {
        let raw = RawEntry {
            title: Some("   ".to_string()),
            ..Default::default()
        };
        let article = Article::from_raw(raw, "2024-03-01T08:00:00+00:00", 200);
        assert_eq!(article.title, "(untitled)");
    }

    #[test]
    fn test_summary_preferred_over_description() {
        let raw = RawEntry {
            summary: Some("the summary".to_string()),
            description: Some("the description".to_string()),
            ..Default::default()
        };
        let article = Article::from_raw(raw, "t", 200);
        assert_eq!(article.summary, "the summary");
    }

    #[test]
    fn test_description_used_when_summary_absent() {
        let raw = RawEntry {
            description: Some("the description".to_string()),
            ..Default::default()
        };
        let article = Article::from_raw(raw, "t", 200);
        assert_eq!(article.summary, "the description");
    }

    #[test]
    fn test_summary_is_sanitized_and_truncated() {
        let raw = RawEntry {
            summary: Some(format!("<p>{}</p>", "word ".repeat(100))),
            ..Default::default()
        };
        let article = Article::from_raw(raw, "t", 20);

        assert!(!article.summary.contains('<'));
        assert!(article.summary.ends_with("..."));
        assert!(article.summary.chars().count() <= 23);
    }

    #[test]
    fn test_identity_is_link_when_present() {
        let raw = RawEntry {
            title: Some("A title".to_string()),
            link: Some("https://example.com/a".to_string()),
            ..Default::default()
        };
        let article = Article::from_raw(raw, "t", 200);
        assert_eq!(article.identity(), "https://example.com/a");
    }

    #[test]
    fn test_identity_falls_back_to_title() {
        let raw = RawEntry {
            title: Some("A title".to_string()),
            ..Default::default()
        };
        let article = Article::from_raw(raw, "t", 200);
        assert_eq!(article.identity(), "A title");
    }
}
