//! Append and read queries for the three news tables.
//!
//! Appends bind each column as a parallel slice and insert through a single
//! `INSERT … SELECT * FROM UNNEST(…)` so a whole batch lands in one
//! round-trip. There is no ON CONFLICT clause anywhere here: the tables are
//! append-only and duplicate suppression happens upstream in the pipeline.

use chrono::{DateTime, Utc};
use newsdesk_core::{ActorRecord, CuratedNewsRecord, RawNewsRecord};
use sqlx::PgPool;

use crate::DbError;

/// Appends normalized raw records in batch order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn append_raw_records(pool: &PgPool, records: &[RawNewsRecord]) -> Result<(), DbError> {
    if records.is_empty() {
        return Ok(());
    }

    let mut titles: Vec<&str> = Vec::with_capacity(records.len());
    let mut published_times: Vec<DateTime<Utc>> = Vec::with_capacity(records.len());
    let mut descriptions: Vec<&str> = Vec::with_capacity(records.len());
    let mut links: Vec<&str> = Vec::with_capacity(records.len());
    let mut ids: Vec<&str> = Vec::with_capacity(records.len());
    let mut thumbnail_urls: Vec<Option<&str>> = Vec::with_capacity(records.len());
    let mut categories: Vec<&str> = Vec::with_capacity(records.len());

    for record in records {
        titles.push(&record.title);
        published_times.push(record.published_time);
        descriptions.push(&record.description);
        links.push(&record.link);
        ids.push(&record.id);
        thumbnail_urls.push(record.thumbnail_url.as_deref());
        categories.push(&record.category);
    }

    sqlx::query(
        "INSERT INTO raw_news \
             (title, published_time, description, link, id, thumbnail_url, category) \
         SELECT * FROM UNNEST(\
             $1::text[], $2::timestamptz[], $3::text[], $4::text[], $5::text[], \
             $6::text[], $7::text[])",
    )
    .bind(&titles)
    .bind(&published_times)
    .bind(&descriptions)
    .bind(&links)
    .bind(&ids)
    .bind(&thumbnail_urls)
    .bind(&categories)
    .execute(pool)
    .await?;

    Ok(())
}

/// Appends curated records in batch order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn append_curated_records(
    pool: &PgPool,
    records: &[CuratedNewsRecord],
) -> Result<(), DbError> {
    if records.is_empty() {
        return Ok(());
    }

    let mut titles: Vec<&str> = Vec::with_capacity(records.len());
    let mut published_times: Vec<DateTime<Utc>> = Vec::with_capacity(records.len());
    let mut descriptions: Vec<&str> = Vec::with_capacity(records.len());
    let mut links: Vec<&str> = Vec::with_capacity(records.len());
    let mut ids: Vec<&str> = Vec::with_capacity(records.len());
    let mut thumbnail_urls: Vec<Option<&str>> = Vec::with_capacity(records.len());
    let mut categories: Vec<&str> = Vec::with_capacity(records.len());

    for record in records {
        titles.push(&record.title);
        published_times.push(record.published_time);
        descriptions.push(&record.description);
        links.push(&record.link);
        ids.push(&record.id);
        thumbnail_urls.push(record.thumbnail_url.as_deref());
        categories.push(&record.category);
    }

    sqlx::query(
        "INSERT INTO curated_news \
             (title, published_time, description, link, id, thumbnail_url, category) \
         SELECT * FROM UNNEST(\
             $1::text[], $2::timestamptz[], $3::text[], $4::text[], $5::text[], \
             $6::text[], $7::text[])",
    )
    .bind(&titles)
    .bind(&published_times)
    .bind(&descriptions)
    .bind(&links)
    .bind(&ids)
    .bind(&thumbnail_urls)
    .bind(&categories)
    .execute(pool)
    .await?;

    Ok(())
}

/// Appends actor rows produced by enrichment.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn append_actor_records(pool: &PgPool, records: &[ActorRecord]) -> Result<(), DbError> {
    if records.is_empty() {
        return Ok(());
    }

    let mut news_ids: Vec<&str> = Vec::with_capacity(records.len());
    let mut actor_names: Vec<&str> = Vec::with_capacity(records.len());
    let mut actor_roles: Vec<&str> = Vec::with_capacity(records.len());
    let mut is_main_actors: Vec<bool> = Vec::with_capacity(records.len());
    let mut event_categories: Vec<&str> = Vec::with_capacity(records.len());

    for record in records {
        news_ids.push(&record.news_id);
        actor_names.push(&record.actor_name);
        actor_roles.push(&record.actor_role);
        is_main_actors.push(record.is_main_actor);
        event_categories.push(record.event_category.as_str());
    }

    sqlx::query(
        "INSERT INTO news_actors \
             (news_id, actor_name, actor_role, is_main_actor, event_category) \
         SELECT * FROM UNNEST(\
             $1::text[], $2::text[], $3::text[], $4::boolean[], $5::text[])",
    )
    .bind(&news_ids)
    .bind(&actor_names)
    .bind(&actor_roles)
    .bind(&is_main_actors)
    .bind(&event_categories)
    .execute(pool)
    .await?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Read model for the dashboard API
// ---------------------------------------------------------------------------

/// Curated news row tailored for API/dashboard views.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NewsRow {
    pub id: String,
    pub title: String,
    pub published_time: DateTime<Utc>,
    pub description: String,
    pub link: String,
    pub thumbnail_url: Option<String>,
    pub category: String,
}

/// Input filters for curated news listing.
#[derive(Debug, Clone, Default)]
pub struct NewsListFilters<'a> {
    pub category: Option<&'a str>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: i64,
}

/// One actor row as stored, joined on `news_id = id` by the caller.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActorRow {
    pub news_id: String,
    pub actor_name: String,
    pub actor_role: String,
    pub is_main_actor: bool,
    pub event_category: String,
}

/// Mention counts per actor across all articles.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TopActorRow {
    pub actor_name: String,
    pub mention_count: i64,
    pub main_mentions: i64,
    /// Most frequent role label attached to this actor.
    pub top_role: String,
}

/// Article count per feed category.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CategorySummaryRow {
    pub category: String,
    pub article_count: i64,
    pub latest_published_time: Option<DateTime<Utc>>,
}

/// Headline metrics for the dashboard front page.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OverviewStats {
    pub total_articles: i64,
    pub distinct_actors: i64,
    pub main_actor_mentions: i64,
}

/// Returns curated news rows, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_news(
    pool: &PgPool,
    filters: NewsListFilters<'_>,
) -> Result<Vec<NewsRow>, DbError> {
    let rows = sqlx::query_as::<_, NewsRow>(
        "SELECT id, title, published_time, description, link, thumbnail_url, category \
         FROM curated_news \
         WHERE ($1::TEXT IS NULL OR category = $1) \
           AND ($2::timestamptz IS NULL OR published_time >= $2) \
           AND ($3::timestamptz IS NULL OR published_time <= $3) \
         ORDER BY published_time DESC \
         LIMIT $4",
    )
    .bind(filters.category)
    .bind(filters.from)
    .bind(filters.to)
    .bind(filters.limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns the actor rows attached to one article, main actors first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_actors_for_news(pool: &PgPool, news_id: &str) -> Result<Vec<ActorRow>, DbError> {
    let rows = sqlx::query_as::<_, ActorRow>(
        "SELECT news_id, actor_name, actor_role, is_main_actor, event_category \
         FROM news_actors \
         WHERE news_id = $1 \
         ORDER BY is_main_actor DESC, actor_name",
    )
    .bind(news_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns the most-mentioned actors with their main/other split and the
/// role label they carry most often.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_top_actors(pool: &PgPool, limit: i64) -> Result<Vec<TopActorRow>, DbError> {
    let rows = sqlx::query_as::<_, TopActorRow>(
        "SELECT actor_name, \
                COUNT(*) AS mention_count, \
                COUNT(*) FILTER (WHERE is_main_actor) AS main_mentions, \
                MODE() WITHIN GROUP (ORDER BY actor_role) AS top_role \
         FROM news_actors \
         GROUP BY actor_name \
         ORDER BY mention_count DESC, actor_name \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns article counts per feed category.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_category_summary(pool: &PgPool) -> Result<Vec<CategorySummaryRow>, DbError> {
    let rows = sqlx::query_as::<_, CategorySummaryRow>(
        "SELECT category, \
                COUNT(*) AS article_count, \
                MAX(published_time) AS latest_published_time \
         FROM curated_news \
         GROUP BY category \
         ORDER BY article_count DESC, category",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns the headline metrics for the dashboard front page.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_overview(pool: &PgPool) -> Result<OverviewStats, DbError> {
    let stats = sqlx::query_as::<_, OverviewStats>(
        "SELECT \
             (SELECT COUNT(*) FROM curated_news) AS total_articles, \
             (SELECT COUNT(DISTINCT actor_name) FROM news_actors) AS distinct_actors, \
             (SELECT COUNT(*) FROM news_actors WHERE is_main_actor) AS main_actor_mentions",
    )
    .fetch_one(pool)
    .await?;

    Ok(stats)
}
