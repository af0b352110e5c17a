use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::domain::Subscription;
use crate::errors::{FeedlogError, FeedlogResult};
use crate::storage::json::document::{load_document, save_document};
use crate::storage::traits::SubscriptionRepository;

/// Subscriptions persist as a flat JSON object of name -> feed URL.
/// The document keeps insertion order, so listing is stable across loads.
///
/// Every operation reloads the document before mutating it and persists
/// immediately afterwards; a confirmed write is never lost to process exit.
#[derive(Debug, Clone)]
pub struct JsonSubscriptionRepository {
    path: PathBuf,
}

impl JsonSubscriptionRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn load_map(&self) -> Map<String, Value> {
        load_document(&self.path)
    }
}

impl SubscriptionRepository for JsonSubscriptionRepository {
    fn add(&self, subscription: &Subscription) -> FeedlogResult<()> {
        let mut map = self.load_map();
        if map
            .values()
            .any(|value| value.as_str() == Some(subscription.url.as_str()))
        {
            return Err(FeedlogError::DuplicateUrl(subscription.url.clone()));
        }
        // A re-used name keeps its position in the document; only its URL
        // is replaced (last write wins).
        map.insert(
            subscription.name.clone(),
            Value::String(subscription.url.clone()),
        );
        save_document(&self.path, &map)
    }

    fn remove(&self, name: &str) -> FeedlogResult<()> {
        let mut map = self.load_map();
        // shift_remove keeps the remaining entries in order
        if map.shift_remove(name).is_none() {
            return Err(FeedlogError::NotFound(name.to_string()));
        }
        save_document(&self.path, &map)
    }

    fn get_all(&self) -> FeedlogResult<Vec<Subscription>> {
        Ok(self
            .load_map()
            .into_iter()
            .filter_map(|(name, value)| match value {
                Value::String(url) => Some(Subscription::new(name, url)),
                _ => None,
            })
            .collect())
    }

    fn exists(&self, url: &str) -> FeedlogResult<bool> {
        Ok(self
            .load_map()
            .values()
            .any(|value| value.as_str() == Some(url)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, JsonSubscriptionRepository) {
        let dir = TempDir::new().unwrap();
        let repo = JsonSubscriptionRepository::new(dir.path().join("subscriptions.json"));
        (dir, repo)
    }

    #[test]
    fn test_add_and_get_all() {
        let (_dir, repo) = setup();

        repo.add(&Subscription::new("Tech", "http://x.com/rss")).unwrap();
        let all = repo.get_all().unwrap();

        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Tech");
        assert_eq!(all[0].url, "http://x.com/rss");
    }

    #[test]
    fn test_listing_keeps_insertion_order() {
        let (_dir, repo) = setup();

        repo.add(&Subscription::new("Zeta", "http://zeta.example/rss")).unwrap();
        repo.add(&Subscription::new("Alpha", "http://alpha.example/rss")).unwrap();
        repo.add(&Subscription::new("Mid", "http://mid.example/rss")).unwrap();

        let names: Vec<String> = repo.get_all().unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_duplicate_url_rejected_under_any_name() {
        let (_dir, repo) = setup();

        repo.add(&Subscription::new("Tech", "http://x.com/rss")).unwrap();
        let result = repo.add(&Subscription::new("Tech2", "http://x.com/rss"));

        assert!(matches!(result, Err(FeedlogError::DuplicateUrl(_))));
    }

    #[test]
    fn test_same_name_overwrites_url_keeping_position() {
        let (_dir, repo) = setup();

        repo.add(&Subscription::new("Tech", "http://old.example/rss")).unwrap();
        repo.add(&Subscription::new("News", "http://news.example/rss")).unwrap();
        repo.add(&Subscription::new("Tech", "http://new.example/rss")).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Tech");
        assert_eq!(all[0].url, "http://new.example/rss");
        assert_eq!(all[1].name, "News");
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let (_dir, repo) = setup();

        repo.add(&Subscription::new("A", "http://a.example/rss")).unwrap();
        repo.add(&Subscription::new("B", "http://b.example/rss")).unwrap();
        repo.add(&Subscription::new("C", "http://c.example/rss")).unwrap();

        repo.remove("B").unwrap();

        let names: Vec<String> = repo.get_all().unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_remove_unknown_name_is_not_found() {
        let (_dir, repo) = setup();
        let result = repo.remove("nope");
        assert!(matches!(result, Err(FeedlogError::NotFound(_))));
    }

    #[test]
    fn test_exists() {
        let (_dir, repo) = setup();

        assert!(!repo.exists("http://x.com/rss").unwrap());
        repo.add(&Subscription::new("Tech", "http://x.com/rss")).unwrap();
        assert!(repo.exists("http://x.com/rss").unwrap());
    }

    #[test]
    fn test_corrupt_document_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("subscriptions.json");
        fs::write(&path, "[1, 2, oops").unwrap();

        let repo = JsonSubscriptionRepository::new(&path);
        assert!(repo.get_all().unwrap().is_empty());

        // And the store is usable again after the next write
        repo.add(&Subscription::new("Tech", "http://x.com/rss")).unwrap();
        assert_eq!(repo.get_all().unwrap().len(), 1);
    }
}
