use chrono::Utc;
use url::Url;

use crate::domain::Subscription;
use crate::errors::{FeedlogError, FeedlogResult};
use crate::storage::traits::SubscriptionRepository;

pub struct SubscriptionService<R: SubscriptionRepository> {
    repository: R,
}

impl<R: SubscriptionRepository> SubscriptionService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Register a subscription. The URL must be well-formed and unique
    /// across all names; re-adding an existing name replaces that name's
    /// URL (last write wins -- a property of the name -> URL mapping, kept
    /// deliberate and tested rather than accidental).
    pub fn add(&self, name: &str, url: &str) -> FeedlogResult<Subscription> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FeedlogError::InvalidArgument(
                "subscription name must not be empty".to_string(),
            ));
        }
        Self::validate_url(url)?;

        let subscription = Subscription::new(name, url);
        self.repository.add(&subscription)?;
        Ok(subscription)
    }

    /// Remove by name, or by 1-based list position when the identifier is
    /// numeric. Returns the removed subscription for display.
    pub fn remove(&self, identifier: &str) -> FeedlogResult<Subscription> {
        let identifier = identifier.trim();
        let subscription = match identifier.parse::<usize>() {
            Ok(position) => self.get_by_position(position)?,
            Err(_) => self
                .repository
                .get_all()?
                .into_iter()
                .find(|s| s.name == identifier)
                .ok_or_else(|| FeedlogError::NotFound(identifier.to_string()))?,
        };
        self.repository.remove(&subscription.name)?;
        Ok(subscription)
    }

    /// Subscriptions in persisted (insertion) order.
    pub fn list(&self) -> FeedlogResult<Vec<Subscription>> {
        self.repository.get_all()
    }

    pub fn get_by_position(&self, position: usize) -> FeedlogResult<Subscription> {
        let subscriptions = self.repository.get_all()?;
        if position == 0 || position > subscriptions.len() {
            return Err(FeedlogError::NotFound(format!(
                "no subscription at position {}",
                position
            )));
        }
        subscriptions
            .into_iter()
            .nth(position - 1)
            .ok_or_else(|| FeedlogError::NotFound(format!("no subscription at position {}", position)))
    }

    pub fn validate_url(url: &str) -> FeedlogResult<()> {
        if url.trim().is_empty() {
            return Err(FeedlogError::InvalidArgument(
                "feed URL must not be empty".to_string(),
            ));
        }
        let parsed =
            Url::parse(url).map_err(|e| FeedlogError::InvalidUrl(format!("{}: {}", url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FeedlogError::InvalidUrl(format!(
                "{}: only http and https feeds are supported",
                url
            )));
        }
        Ok(())
    }

    /// Name used when a feed declares no usable title.
    pub fn fallback_name() -> String {
        format!("untitled_{}", Utc::now().format("%Y%m%d%H%M%S"))
    }
}
