use axum::http::{HeaderMap, header::AUTHORIZATION};
use serde_json::Value;

use crate::{
    config::Config,
    database::{FeedbackQuery, SortOrder},
    error::AppError,
    routes::ListParams,
};

pub const MAX_FEEDBACK_CHARS: usize = 5000;
pub const DEFAULT_PAGE_SIZE: i64 = 50;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Admin gate for list/delete. A missing header and a wrong credential are
/// distinct outcomes (401 vs 403).
pub fn require_admin(headers: &HeaderMap, config: &Config) -> Result<(), AppError> {
    let header = headers.get(AUTHORIZATION).ok_or(AppError::MissingAuth)?;

    let raw = header.to_str().map_err(|_| AppError::Forbidden)?;
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();

    if token != config.admin_token {
        return Err(AppError::Forbidden);
    }

    Ok(())
}

/// Submission body checks, in order, first failure wins: field present,
/// field is a string, trimmed text non-empty, trimmed text within the cap.
pub fn validate_feedback_text(payload: &Value) -> Result<String, AppError> {
    let raw = payload
        .get("feedbackText")
        .ok_or(AppError::MissingFeedbackText)?;

    let text = raw.as_str().ok_or(AppError::InvalidFeedbackTextType)?;

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::EmptyFeedbackText);
    }

    if trimmed.chars().count() > MAX_FEEDBACK_CHARS {
        return Err(AppError::FeedbackTextTooLong);
    }

    Ok(trimmed.to_string())
}

/// Pagination/sort/search checks. Absent and empty parameters fall back to
/// defaults; anything else must parse or the request is rejected with a
/// per-parameter code. Oversized limits are clamped rather than rejected.
pub fn validate_list_params(params: &ListParams) -> Result<FeedbackQuery, AppError> {
    let limit = match provided(&params.limit) {
        Some(raw) => {
            let parsed: i64 = raw.parse().map_err(|_| AppError::InvalidLimit)?;
            if parsed < 1 {
                return Err(AppError::InvalidLimit);
            }
            parsed.min(MAX_PAGE_SIZE)
        }
        None => DEFAULT_PAGE_SIZE,
    };

    let offset = match provided(&params.offset) {
        Some(raw) => {
            let parsed: i64 = raw.parse().map_err(|_| AppError::InvalidOffset)?;
            if parsed < 0 {
                return Err(AppError::InvalidOffset);
            }
            parsed
        }
        None => 0,
    };

    let sort = match provided(&params.sort) {
        Some(raw) => match raw.to_lowercase().as_str() {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            _ => return Err(AppError::InvalidSort),
        },
        None => SortOrder::Desc,
    };

    Ok(FeedbackQuery {
        search: provided(&params.search).map(str::to_string),
        sort,
        limit,
        offset,
    })
}

/// `?limit=` counts as not provided, same as leaving the parameter off.
fn provided(param: &Option<String>) -> Option<&str> {
    param.as_deref().filter(|raw| !raw.is_empty())
}

/// Delete body check: `id` must be a JSON integer.
pub fn validate_feedback_id(payload: &Value) -> Result<i64, AppError> {
    payload
        .get("id")
        .and_then(Value::as_i64)
        .ok_or(AppError::InvalidFeedbackId)
}
