use std::path::PathBuf;
use std::time::Duration;

use crate::errors::{FeedlogError, FeedlogResult};

#[derive(Debug, Clone)]
pub struct Config {
    pub subscriptions_path: PathBuf,
    pub history_path: PathBuf,
    pub page_size: usize,
    pub summary_max_len: usize,
    /// Newest-n articles retained per feed; `None` keeps everything.
    pub history_cap: Option<usize>,
    pub fetch_timeout: Duration,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> FeedlogResult<Self> {
        let exe_dir = Self::exe_dir();

        // Try to load .env from executable's directory first
        if let Some(ref dir) = exe_dir {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        let default_path = |file: &str| {
            exe_dir
                .as_ref()
                .map(|d| d.join(file))
                .unwrap_or_else(|| PathBuf::from(file))
        };

        let subscriptions_path = std::env::var("FEEDLOG_SUBSCRIPTIONS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_path("subscriptions.json"));

        let history_path = std::env::var("FEEDLOG_HISTORY_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_path("articles_history.json"));

        let page_size = parse_positive("FEEDLOG_PAGE_SIZE")?.unwrap_or(5);
        let summary_max_len = parse_positive("FEEDLOG_SUMMARY_MAX_LEN")?.unwrap_or(200);
        let history_cap = parse_positive("FEEDLOG_HISTORY_CAP")?;
        let timeout_secs = parse_positive("FEEDLOG_FETCH_TIMEOUT_SECS")?.unwrap_or(10);

        Ok(Self {
            subscriptions_path,
            history_path,
            page_size,
            summary_max_len,
            history_cap,
            fetch_timeout: Duration::from_secs(timeout_secs as u64),
        })
    }
}

/// Unset -> None; set -> a positive integer or a Config error. Malformed
/// values are never silently coerced.
fn parse_positive(name: &str) -> FeedlogResult<Option<usize>> {
    let raw = match std::env::var(name) {
        Ok(raw) => raw,
        Err(_) => return Ok(None),
    };
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Ok(Some(value)),
        _ => Err(FeedlogError::Config(format!(
            "{} must be a positive integer, got '{}'",
            name, raw
        ))),
    }
}
