//! Storage seam between the pipeline and its backing tables.

use async_trait::async_trait;
use newsdesk_core::{ActorRecord, CuratedNewsRecord, RawNewsRecord};

/// Append-only sink for the three news tables.
///
/// The pipeline only ever appends; updates and deletes are not part of
/// the contract. The production implementation writes to Postgres, and
/// tests substitute in-memory recorders.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Appends normalized records to the raw news table.
    ///
    /// # Errors
    ///
    /// Returns an error when the append is not durably written; the
    /// pipeline treats that as fatal for the feed being processed.
    async fn append_raw(&self, records: &[RawNewsRecord]) -> anyhow::Result<()>;

    /// Appends curated records to the curated news table.
    ///
    /// # Errors
    ///
    /// Same contract as [`TableStore::append_raw`].
    async fn append_curated(&self, records: &[CuratedNewsRecord]) -> anyhow::Result<()>;

    /// Appends actor rows produced by enrichment.
    ///
    /// # Errors
    ///
    /// Same contract as [`TableStore::append_raw`].
    async fn append_actors(&self, records: &[ActorRecord]) -> anyhow::Result<()>;
}
