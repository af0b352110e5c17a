mod document;
mod history_repository;
mod subscription_repository;

pub use history_repository::JsonHistoryRepository;
pub use subscription_repository::JsonSubscriptionRepository;
