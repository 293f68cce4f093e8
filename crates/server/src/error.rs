//! API error taxonomy and HTTP status mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Errors surfaced by route handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed input (bad request body, invalid id, unparsable LLM reply)
    #[error("{0}")]
    Validation(String),
    /// Bad credentials
    #[error("invalid credentials")]
    Unauthorized,
    /// Ownership mismatch on a mutating route
    #[error("forbidden")]
    Forbidden,
    #[error("{0} not found")]
    NotFound(&'static str),
    /// Duplicate registration
    #[error("{0}")]
    Conflict(String),
    /// A remote dependency (OpenRouter, Shopify) failed or is not configured
    #[error("upstream error: {0}")]
    Upstream(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<crate::storage::StoreError> for ApiError {
    fn from(err: crate::storage::StoreError) -> Self {
        use crate::storage::StoreError;
        match err {
            StoreError::DuplicateEmail(email) => {
                ApiError::Conflict(format!("email already registered: {email}"))
            }
            StoreError::NotFound(what) => ApiError::NotFound(what),
            StoreError::Forbidden => ApiError::Forbidden,
            StoreError::Io(e) => ApiError::Storage(e.to_string()),
            StoreError::Json(e) => ApiError::Storage(e.to_string()),
        }
    }
}

impl From<crate::auth::AuthError> for ApiError {
    fn from(err: crate::auth::AuthError) -> Self {
        ApiError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::NotFound("listing").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Upstream("down".into()).status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
