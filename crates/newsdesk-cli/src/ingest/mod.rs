//! The `ingest` command: run the pipeline over the configured feed map.
//!
//! Per-feed failures are logged and skipped rather than propagated so a
//! single unreachable feed does not abort the full run; the command only
//! exits non-zero when configuration is broken or every feed failed.

use newsdesk_core::{AppConfig, FeedConfig};
use newsdesk_db::{PgTableStore, RunTotals};
use newsdesk_enrich::OpenAiClient;
use newsdesk_feeds::FeedClient;
use newsdesk_ingest::{run_feeds, StateStore};
use sqlx::PgPool;

use crate::fail_run_best_effort;

/// Resolve the feeds to process for this invocation.
///
/// With `feed_filter` set, the named feed must exist in the map; without
/// it, the whole configured map is processed.
fn select_feeds(
    feeds: Vec<FeedConfig>,
    feed_filter: Option<&str>,
) -> anyhow::Result<Vec<FeedConfig>> {
    match feed_filter {
        Some(name) => {
            let feed = feeds
                .into_iter()
                .find(|f| f.name.eq_ignore_ascii_case(name))
                .ok_or_else(|| {
                    anyhow::anyhow!("feed '{name}' not found in the configured feed map")
                })?;
            Ok(vec![feed])
        }
        None => Ok(feeds),
    }
}

/// Run the full pipeline: fetch each feed, store fresh entries, enrich.
///
/// When `dry_run` is `true` the function prints which feeds would be
/// ingested and returns without fetching or writing anything.
///
/// # Errors
///
/// Returns an error if the feed map or enrichment client cannot be set up,
/// the run row cannot be created, or every feed fails.
pub(crate) async fn run_ingest(
    pool: &PgPool,
    config: &AppConfig,
    feed_filter: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let feeds_file = newsdesk_core::load_feeds(&config.feeds_path)?;
    let feeds = select_feeds(feeds_file.feeds, feed_filter)?;

    if dry_run {
        let names: Vec<&str> = feeds.iter().map(|f| f.name.as_str()).collect();
        println!(
            "dry-run: would ingest {} feeds: [{}]",
            feeds.len(),
            names.join(", ")
        );
        return Ok(());
    }

    let api_key = config.openai_api_key.as_deref().ok_or_else(|| {
        anyhow::anyhow!("OPENAI_API_KEY is required for ingestion; set it in the environment")
    })?;

    let source = FeedClient::new(config.feed_request_timeout_secs, &config.http_user_agent)?;
    let analyzer = OpenAiClient::new(
        api_key,
        &config.openai_model,
        config.enrich_request_timeout_secs,
    )?;
    let store = PgTableStore::new(pool.clone());
    let state = StateStore::new(&config.state_path);

    let feeds_total = i32::try_from(feeds.len()).unwrap_or(i32::MAX);
    let run = newsdesk_db::create_ingest_run(pool, feeds_total).await?;
    if let Err(e) = newsdesk_db::start_ingest_run(pool, run.id).await {
        fail_run_best_effort(pool, run.id, format!("{e:#}")).await;
        return Err(e.into());
    }

    let report = run_feeds(&source, &analyzer, &store, &state, &feeds).await;

    let totals = RunTotals {
        feeds_failed: i32::try_from(report.failures.len()).unwrap_or(i32::MAX),
        entries_ingested: i32::try_from(report.total_articles()).unwrap_or(i32::MAX),
        actor_rows: i32::try_from(report.total_actors()).unwrap_or(i32::MAX),
    };

    if report.all_failed() {
        let message = format!("all {} feeds failed ingestion", report.failures.len());
        fail_run_best_effort(pool, run.id, message.clone()).await;
        anyhow::bail!("{message}");
    }

    if let Err(err) = newsdesk_db::complete_ingest_run(pool, run.id, totals).await {
        let message = format!("{err:#}");
        fail_run_best_effort(pool, run.id, message).await;
        return Err(err.into());
    }

    println!(
        "ingested {} entries and {} actor rows across {} feeds ({} failed)",
        totals.entries_ingested,
        totals.actor_rows,
        feeds.len(),
        totals.feeds_failed,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(name: &str) -> FeedConfig {
        FeedConfig {
            name: name.to_string(),
            url: format!("https://feeds.test/{}.xml", name.to_lowercase()),
        }
    }

    #[test]
    fn select_feeds_without_filter_keeps_everything() {
        let feeds = vec![feed("Technology"), feed("Business")];
        let selected = select_feeds(feeds, None).expect("select");
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn select_feeds_filter_is_case_insensitive() {
        let feeds = vec![feed("Technology"), feed("Business")];
        let selected = select_feeds(feeds, Some("technology")).expect("select");
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "Technology");
    }

    #[test]
    fn select_feeds_unknown_filter_is_an_error() {
        let feeds = vec![feed("Technology")];
        let err = select_feeds(feeds, Some("Sports")).unwrap_err();
        assert!(err.to_string().contains("'Sports' not found"));
    }
}
