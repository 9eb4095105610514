use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Expected failures carry their own variant and map to a 4xx status with a
/// JSON body; store faults are never retried and surface as 500.
#[derive(Debug)]
pub enum ApiError {
    /// Required field missing from the request body
    Validation(String),
    /// Malformed customer id in path parameter
    InvalidId(String),
    /// Update target does not exist
    NotFound(Uuid),
    /// Failure from the underlying store
    Store(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Validation(field) => (
                StatusCode::BAD_REQUEST,
                format!("Validation error: required field '{}' is missing", field),
            ),
            ApiError::InvalidId(id) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid customer id: expected a UUID, got '{}'", id),
            ),
            ApiError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Customer not found: {}", id),
            ),
            ApiError::Store(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Store error: {}", err),
            ),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Store(err)
    }
}
