//! HTTP error type for glue-site handlers
//!
//! Every error renders as `{"error": {"code", "message", "details"?}}`.
//! In production, 5xx messages are replaced by a generic one in
//! [`redact_server_errors`].

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use glue_common::api::{AdminAuthError, ErrorResponse};
use glue_common::content::{ContentError, Violation};
use thiserror::Error;
use tracing::error;

use crate::AppState;

const GENERIC_SERVER_ERROR: &str = "Internal server error";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Payload failed the section or input shape (422)
    #[error("Validation failed with {} violation(s)", .0.len())]
    Validation(Vec<Violation>),

    /// Conflict (409), e.g. no free slug left
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Admin authentication failed (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] AdminAuthError),

    /// Database error (500)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::UnknownSection(name) => {
                ApiError::NotFound(format!("Unknown section: {}", name))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Validation(_) => "VALIDATION_FAILED",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Database(_) => "DATABASE_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = self.code(), error = %self, "Request failed");
        }

        let body = match &self {
            ApiError::Validation(violations) => ErrorResponse::with_details(
                self.code(),
                self.to_string(),
                serde_json::to_value(violations).unwrap_or_default(),
            ),
            _ => ErrorResponse::new(self.code(), self.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Response mapper: hide 5xx details outside development
pub async fn redact_server_errors(State(state): State<AppState>, response: Response) -> Response {
    if state.environment.exposes_internal_errors() || !response.status().is_server_error() {
        return response;
    }

    let body = ErrorResponse::new("INTERNAL_ERROR", GENERIC_SERVER_ERROR);
    (response.status(), Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Validation(vec![]).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(AdminAuthError::MissingCookie).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unknown_section_maps_to_not_found() {
        let err = ApiError::from(ContentError::UnknownSection("x".into()));
        assert_eq!(err.code(), "NOT_FOUND");

        let err = ApiError::from(ContentError::DuplicateSection("x".into()));
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }
}
