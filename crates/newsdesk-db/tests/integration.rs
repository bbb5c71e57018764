//! Offline unit tests for newsdesk-db pool configuration and row types.
//! These tests do not require a live database connection.

use newsdesk_core::{AppConfig, Environment};
use newsdesk_db::{IngestRunRow, NewsListFilters, PoolConfig, RunTotals};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        feeds_path: PathBuf::from("./config/feeds.yaml"),
        state_path: PathBuf::from("./rss_state.json"),
        openai_api_key: None,
        openai_model: "gpt-4o-mini".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        feed_request_timeout_secs: 30,
        enrich_request_timeout_secs: 30,
        http_user_agent: "ua".to_string(),
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// Compile-time smoke test: confirm that [`IngestRunRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn ingest_run_row_has_expected_fields() {
    use chrono::Utc;
    use uuid::Uuid;

    let row = IngestRunRow {
        id: 1_i64,
        public_id: Uuid::new_v4(),
        status: "queued".to_string(),
        started_at: None,
        completed_at: None,
        feeds_total: 5_i32,
        feeds_failed: 0_i32,
        entries_ingested: 0_i32,
        actor_rows: 0_i32,
        error_message: None,
        created_at: Utc::now(),
    };

    assert_eq!(row.id, 1);
    assert_eq!(row.status, "queued");
    assert_eq!(row.feeds_total, 5);
    assert!(row.started_at.is_none());
    assert!(row.completed_at.is_none());
    assert_eq!(row.entries_ingested, 0);
    assert!(row.error_message.is_none());
}

#[test]
fn run_totals_default_to_zero() {
    let totals = RunTotals::default();
    assert_eq!(totals.feeds_failed, 0);
    assert_eq!(totals.entries_ingested, 0);
    assert_eq!(totals.actor_rows, 0);
}

#[test]
fn news_list_filters_default_has_no_constraints() {
    let filters = NewsListFilters::default();
    assert!(filters.category.is_none());
    assert!(filters.from.is_none());
    assert!(filters.to.is_none());
    assert_eq!(filters.limit, 0);
}
