//! Error types for upstream fetches.

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Failures at the HTTP JSON fetch boundary.
///
/// These are logged and collapsed into a "no data" signal by
/// [`JsonFetcher::fetch`](crate::fetch::JsonFetcher::fetch); they never reach tool output.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport-level failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("HTTP error {status} from {url}")]
    Status { status: u16, url: String },

    /// Body was not valid JSON for the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}
