use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::FeedError;
use crate::parse::parse_feed;
use crate::types::FeedEntry;

/// Source of feed entries, as consumed by the ingestion pipeline.
///
/// Fetch failures are scoped to the one feed being fetched; the pipeline
/// never retries here.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch and parse all entries the feed currently serves, in document
    /// order.
    async fn fetch(&self, feed_url: &str) -> Result<Vec<FeedEntry>, FeedError>;
}

/// HTTP feed source.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    /// Build a client with the given request timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FeedSource for FeedClient {
    async fn fetch(&self, feed_url: &str) -> Result<Vec<FeedEntry>, FeedError> {
        let response = self.client.get(feed_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::UnexpectedStatus {
                status,
                url: feed_url.to_string(),
            });
        }

        let body = response.text().await?;
        let entries = parse_feed(&body)?;
        tracing::debug!(url = feed_url, entries = entries.len(), "fetched feed");

        Ok(entries)
    }
}
