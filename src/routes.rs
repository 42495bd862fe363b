use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::{debug, info};

use crate::{
    database::Feedback,
    error::AppError,
    state::AppState,
    utils::{require_admin, validate_feedback_id, validate_feedback_text, validate_list_params},
};

/// Raw list query parameters; kept as strings so bad values map to
/// per-parameter error codes instead of a generic extractor rejection.
#[derive(Deserialize)]
pub struct ListParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub sort: Option<String>,
    pub search: Option<String>,
}

#[derive(Serialize)]
pub struct ListResponse {
    pub data: Vec<Feedback>,
    pub total: u64,
    pub limit: i64,
    pub offset: i64,
}

/// Shared shape of the submit and delete success bodies.
#[derive(Serialize)]
pub struct MutationResponse {
    pub success: bool,
    pub message: &'static str,
    pub id: i64,
}

/// `POST /feedback`, open to anonymous callers.
pub async fn submit_feedback_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let feedback_text = validate_feedback_text(&payload)?;
    let created_at = OffsetDateTime::now_utc().format(&Rfc3339)?;

    let id = state.database.insert(&feedback_text, &created_at)?;
    info!("Stored feedback {id}");

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse {
            success: true,
            message: "Feedback submitted successfully",
            id,
        }),
    ))
}

/// `GET /feedback`, admin only. Returns the filtered page together with the
/// pre-pagination total and the effective limit/offset.
pub async fn list_feedback_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, AppError> {
    require_admin(&headers, &state.config)?;

    let query = validate_list_params(&params)?;

    let total = state.database.count(query.search.as_deref())?;
    let data = state.database.list(&query)?;

    Ok(Json(ListResponse {
        data,
        total,
        limit: query.limit,
        offset: query.offset,
    }))
}

/// `DELETE /feedback`, admin only. Deleting an id that is already gone
/// still reports success; there is no existence check.
pub async fn delete_feedback_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Result<Json<MutationResponse>, AppError> {
    require_admin(&headers, &state.config)?;

    let id = validate_feedback_id(&payload)?;

    let removed = state.database.delete(id)?;
    debug!("Delete feedback {id}: {removed} row(s) affected");

    Ok(Json(MutationResponse {
        success: true,
        message: "Feedback deleted successfully",
        id,
    }))
}
