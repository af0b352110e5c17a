use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::Article;
use crate::errors::FeedlogResult;
use crate::storage::json::document::{load_document, save_document};
use crate::storage::traits::HistoryRepository;

/// Article history persists as a JSON object of feed URL -> article array.
/// URL keys sort lexically, so successive saves diff cleanly.
///
/// A history entry may outlive its subscription: removing a feed leaves its
/// articles in place until they are deleted explicitly.
#[derive(Debug, Clone)]
pub struct JsonHistoryRepository {
    path: PathBuf,
}

impl JsonHistoryRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn load_all(&self) -> BTreeMap<String, Vec<Article>> {
        load_document(&self.path)
    }
}

impl HistoryRepository for JsonHistoryRepository {
    fn history_for(&self, url: &str) -> FeedlogResult<Vec<Article>> {
        Ok(self.load_all().remove(url).unwrap_or_default())
    }

    fn save_history(&self, url: &str, articles: &[Article]) -> FeedlogResult<()> {
        let mut all = self.load_all();
        all.insert(url.to_string(), articles.to_vec());
        save_document(&self.path, &all)
    }
}
