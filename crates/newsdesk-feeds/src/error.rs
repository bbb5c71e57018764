use thiserror::Error;

/// Errors from fetching or parsing a single feed. A `FeedError` is always
/// scoped to one feed; callers isolate it and continue with the rest.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} fetching {url}")]
    UnexpectedStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("failed to parse feed document: {0}")]
    Parse(#[from] quick_xml::DeError),
}
