use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Feedback text is required")]
    MissingFeedbackText,

    #[error("Feedback text must be a string")]
    InvalidFeedbackTextType,

    #[error("Feedback text cannot be empty")]
    EmptyFeedbackText,

    #[error("Feedback text must not exceed 5000 characters")]
    FeedbackTextTooLong,

    #[error("Authentication required")]
    MissingAuth,

    #[error("Admin access required")]
    Forbidden,

    #[error("Invalid limit parameter")]
    InvalidLimit,

    #[error("Invalid offset parameter")]
    InvalidOffset,

    #[error("Invalid sort parameter. Use \"asc\" or \"desc\"")]
    InvalidSort,

    #[error("Invalid feedback ID")]
    InvalidFeedbackId,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Machine-readable code carried next to the human message.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingFeedbackText => "MISSING_FEEDBACK_TEXT",
            AppError::InvalidFeedbackTextType => "INVALID_FEEDBACK_TEXT_TYPE",
            AppError::EmptyFeedbackText => "EMPTY_FEEDBACK_TEXT",
            AppError::FeedbackTextTooLong => "FEEDBACK_TEXT_TOO_LONG",
            AppError::MissingAuth => "MISSING_AUTH",
            AppError::Forbidden => "FORBIDDEN",
            AppError::InvalidLimit => "INVALID_LIMIT",
            AppError::InvalidOffset => "INVALID_OFFSET",
            AppError::InvalidSort => "INVALID_SORT",
            AppError::InvalidFeedbackId => "INVALID_FEEDBACK_ID",
            AppError::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::MissingAuth => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.to_string(),
            "code": self.code(),
        }));

        (self.status(), body).into_response()
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<time::error::Format> for AppError {
    fn from(e: time::error::Format) -> Self {
        AppError::Internal(e.to_string())
    }
}
