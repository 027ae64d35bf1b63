use thiserror::Error;

/// Failures surfaced while fetching or exporting feed pages.
///
/// Fetch failures are retryable: the coordinator keeps the failed page current.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("failed to decode page: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
