//! Curated news listing and per-article actor lookup.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct NewsItem {
    pub id: String,
    pub title: String,
    pub published_time: DateTime<Utc>,
    pub description: String,
    pub link: String,
    pub thumbnail_url: Option<String>,
    pub category: String,
}

#[derive(Debug, Serialize)]
pub(super) struct NewsActorItem {
    pub news_id: String,
    pub actor_name: String,
    pub actor_role: String,
    pub is_main_actor: bool,
    pub event_category: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct NewsListQuery {
    pub category: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}

pub(super) async fn list_news(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<NewsListQuery>,
) -> Result<Json<ApiResponse<Vec<NewsItem>>>, ApiError> {
    let filters = newsdesk_db::NewsListFilters {
        category: query.category.as_deref(),
        from: query.from,
        to: query.to,
        limit: normalize_limit(query.limit),
    };

    let rows = newsdesk_db::list_news(&state.pool, filters)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| NewsItem {
            id: row.id,
            title: row.title,
            published_time: row.published_time,
            description: row.description,
            link: row.link,
            thumbnail_url: row.thumbnail_url,
            category: row.category,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_news_actors(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(news_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<NewsActorItem>>>, ApiError> {
    let rows = newsdesk_db::list_actors_for_news(&state.pool, &news_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| NewsActorItem {
            news_id: row.news_id,
            actor_name: row.actor_name,
            actor_role: row.actor_role,
            is_main_actor: row.is_main_actor,
            event_category: row.event_category,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
