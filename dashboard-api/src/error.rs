/// Error handling for the API server
///
/// Handlers return `Result<T, ApiError>`, which converts into an HTTP
/// response with the matching status code.
///
/// A failed seeding run keeps the plain body the dashboard frontend
/// expects. `error` carries the underlying error text only; the failed
/// phase goes to the log:
///
/// ```json
/// { "error": "error returned from database: duplicate key value ..." }
/// ```
///
/// Everything else uses [`ErrorResponse`] with an error code and message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dashboard_shared::seed::SeedError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Not found (404)
    NotFound(String),

    /// Seeding run failed (500)
    SeedFailed(SeedError),
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "not_found")
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

/// Body of a failed `GET /seed`
#[derive(Debug, Serialize, Deserialize)]
pub struct SeedErrorResponse {
    pub error: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::SeedFailed(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                let body = Json(ErrorResponse {
                    error: "not_found".to_string(),
                    message,
                });
                (StatusCode::NOT_FOUND, body).into_response()
            }
            ApiError::SeedFailed(err) => {
                tracing::error!(phase = %err.phase(), "Seed request failed: {}", err);
                let body = Json(SeedErrorResponse {
                    error: err.message(),
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

impl From<SeedError> for ApiError {
    fn from(err: SeedError) -> Self {
        ApiError::SeedFailed(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_shared::seed::{EntityKind, SeedPhase};

    #[test]
    fn test_error_display() {
        let err = ApiError::NotFound("No route for /nope".to_string());
        assert_eq!(err.to_string(), "Not found: No route for /nope");
    }

    #[test]
    fn test_status_codes() {
        let response = ApiError::NotFound("missing".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_seed_error_body_is_underlying_message() {
        let err = SeedError::new(
            SeedPhase::Insert(EntityKind::Invoices),
            sqlx::Error::Protocol("connection reset".to_string()),
        );
        let expected = err.message();

        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: SeedErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.error, expected);
        assert!(!body.error.starts_with("Seeding failed during"));
    }
}
