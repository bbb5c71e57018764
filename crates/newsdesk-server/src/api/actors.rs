//! Most-mentioned actors across all articles.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct TopActorItem {
    pub actor_name: String,
    pub mention_count: i64,
    pub main_mentions: i64,
    pub top_role: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct TopActorsQuery {
    pub limit: Option<i64>,
}

pub(super) async fn list_top_actors(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<TopActorsQuery>,
) -> Result<Json<ApiResponse<Vec<TopActorItem>>>, ApiError> {
    let rows = newsdesk_db::list_top_actors(&state.pool, normalize_limit(query.limit))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| TopActorItem {
            actor_name: row.actor_name,
            mention_count: row.mention_count,
            main_mentions: row.main_mentions,
            top_role: row.top_role,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
