//! Aggregate views: per-category counts and the dashboard overview.

use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct CategorySummaryItem {
    pub category: String,
    pub article_count: i64,
    pub latest_published_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub(super) struct OverviewData {
    pub total_articles: i64,
    pub distinct_actors: i64,
    pub main_actor_mentions: i64,
}

pub(super) async fn category_summary(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<CategorySummaryItem>>>, ApiError> {
    let rows = newsdesk_db::get_category_summary(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| CategorySummaryItem {
            category: row.category,
            article_count: row.article_count,
            latest_published_time: row.latest_published_time,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn overview(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<OverviewData>>, ApiError> {
    let stats = newsdesk_db::get_overview(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: OverviewData {
            total_articles: stats.total_articles,
            distinct_actors: stats.distinct_actors,
            main_actor_mentions: stats.main_actor_mentions,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
