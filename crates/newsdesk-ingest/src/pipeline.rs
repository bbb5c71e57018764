//! Feed-level orchestration: fetch, filter against state, normalize,
//! store, then enrich.
//!
//! Ordering inside one feed is load-bearing. Raw and curated rows are
//! appended before the state file is saved, so an append failure leaves
//! the entries unmarked and the next run retries them. Actor enrichment
//! runs after the state save: its rows are additive and a failure there
//! must not cause already-stored articles to be ingested twice.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use newsdesk_core::{CuratedNewsRecord, FeedConfig, RawNewsRecord};
use newsdesk_enrich::{extract_actors, EventAnalyzer};
use newsdesk_feeds::{FeedEntry, FeedSource};

use crate::curate::curate;
use crate::error::IngestError;
use crate::state::StateStore;
use crate::store::TableStore;

/// Result of ingesting one feed.
#[derive(Debug, PartialEq)]
pub enum IngestOutcome {
    /// Every fetched entry was already recorded in the state file. This
    /// is the steady-state result between feed updates, not an error.
    NoPendingEntries,
    /// Fresh entries were normalized and stored; the curated rows are
    /// returned for enrichment.
    Ingested(Vec<CuratedNewsRecord>),
}

/// Per-feed totals for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSummary {
    pub feed: String,
    pub articles: usize,
    pub actors: usize,
}

/// What happened to a feed that did not complete.
#[derive(Debug)]
pub struct FeedFailure {
    pub feed: String,
    pub error: IngestError,
}

/// Aggregate outcome of a run over every configured feed.
#[derive(Debug, Default)]
pub struct RunReport {
    pub summaries: Vec<FeedSummary>,
    pub failures: Vec<FeedFailure>,
}

impl RunReport {
    /// True when feeds were attempted and none succeeded.
    #[must_use]
    pub fn all_failed(&self) -> bool {
        self.summaries.is_empty() && !self.failures.is_empty()
    }

    #[must_use]
    pub fn total_articles(&self) -> usize {
        self.summaries.iter().map(|s| s.articles).sum()
    }

    #[must_use]
    pub fn total_actors(&self) -> usize {
        self.summaries.iter().map(|s| s.actors).sum()
    }
}

/// Ingests one feed: fetch, drop already-processed entries, normalize,
/// append to the raw and curated tables, then mark the entries processed.
///
/// # Errors
///
/// - [`IngestError::Fetch`] if the feed cannot be fetched or parsed.
/// - [`IngestError::MissingTimestamp`] / [`IngestError::TimestampParse`]
///   if any fresh entry has a missing or invalid `pubDate`; the whole
///   batch is rejected before anything is stored.
/// - [`IngestError::Store`] if an append is rejected; the state file is
///   left untouched so the batch is retried on the next run.
/// - [`IngestError::State`] / [`IngestError::StateEncode`] if the state
///   file cannot be replaced after the appends succeeded.
pub async fn ingest(
    source: &dyn FeedSource,
    store: &dyn TableStore,
    state: &StateStore,
    feed: &FeedConfig,
) -> Result<IngestOutcome, IngestError> {
    let entries = source
        .fetch(&feed.url)
        .await
        .map_err(|source| IngestError::Fetch {
            feed: feed.name.clone(),
            source,
        })?;
    let fetched = entries.len();

    let processed = state.load();

    // `known` also collapses duplicate guids within a single fetch.
    let mut known: HashSet<String> = processed.iter().cloned().collect();
    let fresh: Vec<FeedEntry> = entries
        .into_iter()
        .filter(|entry| known.insert(entry.guid.clone()))
        .collect();

    if fresh.is_empty() {
        tracing::info!(feed = %feed.name, fetched, "no pending entries");
        return Ok(IngestOutcome::NoPendingEntries);
    }

    let raw = normalize_entries(feed, fresh)?;

    store
        .append_raw(&raw)
        .await
        .map_err(|cause| IngestError::Store {
            table: "raw_news",
            cause,
        })?;

    let curated = curate(&raw);
    store
        .append_curated(&curated)
        .await
        .map_err(|cause| IngestError::Store {
            table: "curated_news",
            cause,
        })?;

    // Only now are the entries marked processed. Failing earlier leaves
    // them unmarked, trading duplicate work on retry for never losing an
    // article.
    let mut all_ids = processed;
    all_ids.extend(curated.iter().map(|c| c.id.clone()));
    state.save(&all_ids)?;

    tracing::info!(
        feed = %feed.name,
        fetched,
        ingested = curated.len(),
        "ingested fresh entries"
    );

    Ok(IngestOutcome::Ingested(curated))
}

/// Runs the full pipeline for one feed: ingest, then actor enrichment
/// for whatever was freshly curated.
///
/// Enrichment failures for individual articles are soft (see
/// [`extract_actors`]); only a rejected append of the actor rows fails
/// the feed.
///
/// # Errors
///
/// Everything [`ingest`] returns, plus [`IngestError::Store`] for the
/// actor table.
pub async fn run_feed(
    source: &dyn FeedSource,
    analyzer: &dyn EventAnalyzer,
    store: &dyn TableStore,
    state: &StateStore,
    feed: &FeedConfig,
) -> Result<FeedSummary, IngestError> {
    let curated = match ingest(source, store, state, feed).await? {
        IngestOutcome::NoPendingEntries => {
            return Ok(FeedSummary {
                feed: feed.name.clone(),
                articles: 0,
                actors: 0,
            });
        }
        IngestOutcome::Ingested(curated) => curated,
    };

    let actors = extract_actors(analyzer, &curated).await;
    if !actors.is_empty() {
        store
            .append_actors(&actors)
            .await
            .map_err(|cause| IngestError::Store {
                table: "news_actors",
                cause,
            })?;
    }

    Ok(FeedSummary {
        feed: feed.name.clone(),
        articles: curated.len(),
        actors: actors.len(),
    })
}

/// Runs every configured feed sequentially, isolating failures.
///
/// One feed failing never prevents the remaining feeds from running;
/// the caller inspects the report to decide whether a partial run is
/// acceptable.
pub async fn run_feeds(
    source: &dyn FeedSource,
    analyzer: &dyn EventAnalyzer,
    store: &dyn TableStore,
    state: &StateStore,
    feeds: &[FeedConfig],
) -> RunReport {
    let mut report = RunReport::default();

    for feed in feeds {
        match run_feed(source, analyzer, store, state, feed).await {
            Ok(summary) => {
                tracing::info!(
                    feed = %summary.feed,
                    articles = summary.articles,
                    actors = summary.actors,
                    "feed complete"
                );
                report.summaries.push(summary);
            }
            Err(error) => {
                tracing::error!(feed = %feed.name, error = %error, "feed ingestion failed");
                report.failures.push(FeedFailure {
                    feed: feed.name.clone(),
                    error,
                });
            }
        }
    }

    report
}

fn normalize_entries(
    feed: &FeedConfig,
    entries: Vec<FeedEntry>,
) -> Result<Vec<RawNewsRecord>, IngestError> {
    entries
        .into_iter()
        .map(|entry| normalize_entry(feed, entry))
        .collect()
}

/// Converts one feed entry into a raw record, stamping the feed name as
/// the category.
fn normalize_entry(feed: &FeedConfig, entry: FeedEntry) -> Result<RawNewsRecord, IngestError> {
    let raw_published = entry
        .published
        .ok_or_else(|| IngestError::MissingTimestamp {
            feed: feed.name.clone(),
            entry_id: entry.guid.clone(),
        })?;

    let published_time = DateTime::parse_from_rfc2822(&raw_published)
        .map_err(|source| IngestError::TimestampParse {
            feed: feed.name.clone(),
            entry_id: entry.guid.clone(),
            raw: raw_published.clone(),
            source,
        })?
        .with_timezone(&Utc);

    Ok(RawNewsRecord {
        title: entry.title,
        published_time,
        description: entry.description,
        link: entry.link,
        id: entry.guid,
        thumbnail_url: entry.thumbnail_url,
        category: feed.name.clone(),
    })
}
