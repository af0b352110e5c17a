pub mod json;
pub mod traits;

pub use json::{JsonHistoryRepository, JsonSubscriptionRepository};
pub use traits::{HistoryRepository, SubscriptionRepository};
