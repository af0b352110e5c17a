use crate::domain::RawEntry;
use crate::errors::FeedlogResult;

#[cfg_attr(test, mockall::automock)]
pub trait FeedFetcher: Send + Sync {
    /// Fetch the feed and return its declared title, if any.
    fn fetch_title(&self, url: &str) -> FeedlogResult<Option<String>>;

    /// Fetch the feed and return its entries in document order.
    fn fetch_entries(&self, url: &str) -> FeedlogResult<Vec<RawEntry>>;
}
