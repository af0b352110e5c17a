use chrono::Utc;

use crate::domain::{Article, Subscription};
use crate::errors::FeedlogResult;
use crate::fetch::traits::FeedFetcher;
use crate::history::merge;
use crate::storage::traits::HistoryRepository;

/// What one refresh of one feed accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub fetched_count: usize,
    pub new_count: usize,
}

/// Coordinates fetch -> normalize -> merge -> persist for one subscription.
///
/// A fetch failure surfaces as an error before any history is touched, so
/// a dead feed can never corrupt or shrink what was already stored.
pub struct RefreshService<H: HistoryRepository, F: FeedFetcher> {
    history: H,
    fetcher: F,
    summary_max_len: usize,
    history_cap: Option<usize>,
}

impl<H: HistoryRepository, F: FeedFetcher> RefreshService<H, F> {
    pub fn new(history: H, fetcher: F, summary_max_len: usize, history_cap: Option<usize>) -> Self {
        Self {
            history,
            fetcher,
            summary_max_len,
            history_cap,
        }
    }

    /// Single refresh attempt, no retries; retry policy belongs to callers.
    pub fn refresh(&self, subscription: &Subscription) -> FeedlogResult<RefreshOutcome> {
        let raw_entries = self.fetcher.fetch_entries(&subscription.url)?;

        // One timestamp per refresh so the whole batch sorts together
        let fetch_time = Utc::now().to_rfc3339();
        let incoming: Vec<Article> = raw_entries
            .into_iter()
            .map(|raw| Article::from_raw(raw, &fetch_time, self.summary_max_len))
            .collect();
        let fetched_count = incoming.len();

        let existing = self.history.history_for(&subscription.url)?;
        let outcome = merge(existing, &incoming, self.history_cap);
        if outcome.admitted > 0 {
            self.history
                .save_history(&subscription.url, &outcome.articles)?;
        }

        Ok(RefreshOutcome {
            fetched_count,
            new_count: outcome.admitted,
        })
    }

    /// Refresh every subscription, continuing past individual failures.
    pub fn refresh_all(
        &self,
        subscriptions: &[Subscription],
    ) -> Vec<(Subscription, FeedlogResult<RefreshOutcome>)> {
        subscriptions
            .iter()
            .map(|subscription| (subscription.clone(), self.refresh(subscription)))
            .collect()
    }
}
