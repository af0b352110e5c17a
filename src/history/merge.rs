use std::collections::HashSet;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::domain::Article;

/// Result of folding a fetched batch into a feed's stored history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub articles: Vec<Article>,
    /// How many incoming articles were actually new.
    pub admitted: usize,
}

/// Merge a freshly fetched batch into the existing history for one feed.
///
/// Existing records always win: an incoming article whose identity is
/// already present is discarded, never updates the stored record. New
/// articles are admitted in batch order, then the combined list is re-sorted
/// newest-first. Re-merging the same batch is a no-op, so the operation is
/// idempotent.
///
/// When nothing is admitted the existing history is returned untouched
/// (no re-sort), which lets callers skip the disk write.
///
/// `cap` trims the sorted result to the newest n articles; `None` retains
/// everything.
pub fn merge(existing: Vec<Article>, incoming: &[Article], cap: Option<usize>) -> MergeOutcome {
    let mut seen: HashSet<String> = existing
        .iter()
        .map(|article| article.identity().to_string())
        .collect();

    let mut admitted_articles = Vec::new();
    for article in incoming {
        if seen.insert(article.identity().to_string()) {
            admitted_articles.push(article.clone());
        }
    }

    let admitted = admitted_articles.len();
    if admitted == 0 {
        return MergeOutcome {
            articles: existing,
            admitted: 0,
        };
    }

    let mut keyed: Vec<(DateTime<Utc>, Article)> = existing
        .into_iter()
        .chain(admitted_articles)
        .map(|article| (effective_timestamp(&article), article))
        .collect();
    // sort_by is stable, so ties keep their relative order
    keyed.sort_by(|a, b| b.0.cmp(&a.0));

    let mut articles: Vec<Article> = keyed.into_iter().map(|(_, article)| article).collect();
    if let Some(cap) = cap {
        articles.truncate(cap);
    }

    MergeOutcome { articles, admitted }
}

/// Sort key: parsed `published`, else parsed `fetch_time`, else the oldest
/// representable instant so unparseable records sink to the end.
fn effective_timestamp(article: &Article) -> DateTime<Utc> {
    parse_timestamp(&article.published)
        .or_else(|| parse_timestamp(&article.fetch_time))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if value.is_empty() || value == "unknown" {
        return None;
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .or_else(|| DateTime::parse_from_rfc2822(value).ok())
        .map(|dt| dt.with_timezone(&Utc))
        // Bare ISO timestamps without an offset are taken as UTC
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.and_utc())
        })
}
