use newsdesk_feeds::FeedError;
use thiserror::Error;

/// Errors raised while running the ingestion pipeline for one feed.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The feed could not be fetched or parsed.
    #[error("feed fetch failed for {feed}: {source}")]
    Fetch {
        feed: String,
        #[source]
        source: FeedError,
    },

    /// A fresh entry arrived without a publication timestamp. Fatal for
    /// the whole batch so a half-normalized batch never reaches storage.
    #[error("entry {entry_id} from {feed} has no publication timestamp")]
    MissingTimestamp { feed: String, entry_id: String },

    /// A fresh entry's timestamp was not valid RFC 2822.
    #[error("entry {entry_id} from {feed} has unparseable timestamp \"{raw}\": {source}")]
    TimestampParse {
        feed: String,
        entry_id: String,
        raw: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Reading or replacing the state file failed.
    #[error("state file error at {path}: {source}")]
    State {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The processed-id list could not be encoded as JSON.
    #[error("state file encoding failed: {0}")]
    StateEncode(#[from] serde_json::Error),

    /// A storage append was rejected. The `{cause:#}` form includes the
    /// full error chain from the storage backend.
    #[error("storage append to {table} failed: {cause:#}")]
    Store {
        table: &'static str,
        cause: anyhow::Error,
    },
}
