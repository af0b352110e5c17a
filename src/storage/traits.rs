use crate::domain::{Article, Subscription};
use crate::errors::FeedlogResult;

#[cfg_attr(test, mockall::automock)]
pub trait SubscriptionRepository: Send + Sync {
    /// Insert or overwrite by name; rejects a URL that is already
    /// subscribed under any name.
    fn add(&self, subscription: &Subscription) -> FeedlogResult<()>;
    fn remove(&self, name: &str) -> FeedlogResult<()>;
    fn get_all(&self) -> FeedlogResult<Vec<Subscription>>;
    fn exists(&self, url: &str) -> FeedlogResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
pub trait HistoryRepository: Send + Sync {
    fn history_for(&self, url: &str) -> FeedlogResult<Vec<Article>>;
    fn save_history(&self, url: &str, articles: &[Article]) -> FeedlogResult<()>;
}
