//! API response wrapper

use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use authkit_core::error::StoreError;

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message: message.to_string(),
            }),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

pub type ErrorResponse = (StatusCode, Json<ApiResponse<()>>);

pub fn bad_request(message: &str) -> ErrorResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error("VALIDATION_ERROR", message)),
    )
}

/// Maps store failures onto HTTP statuses. Storage-level errors surface with
/// their driver message; nothing is retried here.
pub fn store_error(e: StoreError) -> ErrorResponse {
    let (status, code) = match &e {
        StoreError::UserNotFound | StoreError::RoleNotFound => {
            (StatusCode::NOT_FOUND, "NOT_FOUND")
        }
        StoreError::DuplicateUserName(_)
        | StoreError::DuplicateEmail(_)
        | StoreError::DuplicateRoleName(_)
        | StoreError::DuplicateLogin => (StatusCode::CONFLICT, "CONFLICT"),
        StoreError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        StoreError::ContextClosed => (StatusCode::SERVICE_UNAVAILABLE, "CONTEXT_CLOSED"),
        StoreError::Configuration(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
        StoreError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
    };
    (status, Json(ApiResponse::error(code, &e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_statuses() {
        assert_eq!(store_error(StoreError::UserNotFound).0, StatusCode::NOT_FOUND);
        assert_eq!(
            store_error(StoreError::DuplicateEmail("a@b.c".into())).0,
            StatusCode::CONFLICT
        );
        assert_eq!(
            store_error(StoreError::ContextClosed).0,
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            store_error(StoreError::Database("boom".into())).0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
