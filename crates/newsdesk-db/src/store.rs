//! [`TableStore`] backed by Postgres.

use async_trait::async_trait;
use newsdesk_core::{ActorRecord, CuratedNewsRecord, RawNewsRecord};
use newsdesk_ingest::TableStore;
use sqlx::PgPool;

use crate::news::{append_actor_records, append_curated_records, append_raw_records};

/// Production table store: each append is one UNNEST batch insert.
#[derive(Debug, Clone)]
pub struct PgTableStore {
    pool: PgPool,
}

impl PgTableStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TableStore for PgTableStore {
    async fn append_raw(&self, records: &[RawNewsRecord]) -> anyhow::Result<()> {
        append_raw_records(&self.pool, records).await?;
        Ok(())
    }

    async fn append_curated(&self, records: &[CuratedNewsRecord]) -> anyhow::Result<()> {
        append_curated_records(&self.pool, records).await?;
        Ok(())
    }

    async fn append_actors(&self, records: &[ActorRecord]) -> anyhow::Result<()> {
        append_actor_records(&self.pool, records).await?;
        Ok(())
    }
}
