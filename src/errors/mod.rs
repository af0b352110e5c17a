use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedlogError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Subscription errors
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),

    #[error("Feed already subscribed: {0}")]
    DuplicateUrl(String),

    #[error("Subscription not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // Parsing errors
    #[error("Feed parsing failed: {0}")]
    FeedParse(String),

    // Storage errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    // User input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type FeedlogResult<T> = Result<T, FeedlogError>;
