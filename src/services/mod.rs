pub mod refresh_service;
pub mod subscription_service;

pub use refresh_service::{RefreshOutcome, RefreshService};
pub use subscription_service::SubscriptionService;
