//! Recent ingestion runs.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct IngestRunsQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct IngestRunItem {
    ingest_run_id: Uuid,
    status: String,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    feeds_total: i32,
    feeds_failed: i32,
    entries_ingested: i32,
    actor_rows: i32,
    error_message: Option<String>,
    created_at: DateTime<Utc>,
}

pub(super) async fn list_ingest_runs(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<IngestRunsQuery>,
) -> Result<Json<ApiResponse<Vec<IngestRunItem>>>, ApiError> {
    let rows = newsdesk_db::list_ingest_runs(&state.pool, normalize_limit(query.limit))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| IngestRunItem {
            ingest_run_id: row.public_id,
            status: row.status,
            started_at: row.started_at,
            completed_at: row.completed_at,
            feeds_total: row.feeds_total,
            feeds_failed: row.feeds_failed,
            entries_ingested: row.entries_ingested,
            actor_rows: row.actor_rows,
            error_message: row.error_message,
            created_at: row.created_at,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
