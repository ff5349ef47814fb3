//! Error types for HTTP handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use i2r_enrichment::EnrichmentError;
use serde::Serialize;

/// Serializable error returned by HTTP handlers.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// HTTP status of the response
    #[serde(skip)]
    pub status: StatusCode,
    /// Error code for client handling (e.g., "EMPLOYEE_NOT_FOUND")
    pub code: String,
    /// User-friendly error message
    pub message: String,
    /// Optional debugging context
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Create an API error with details.
    pub fn with_details(
        status: StatusCode,
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            details: Some(details),
            ..Self::new(status, code, message)
        }
    }
}

/// Convert EnrichmentError to ApiError for the HTTP response.
impl From<EnrichmentError> for ApiError {
    fn from(err: EnrichmentError) -> Self {
        match err {
            EnrichmentError::NotFound(id) => Self::with_details(
                StatusCode::NOT_FOUND,
                "EMPLOYEE_NOT_FOUND",
                err.to_string(),
                serde_json::json!({ "id": id }),
            ),
            EnrichmentError::Database(e) => {
                tracing::error!("Record store failure: {}", e);
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    format!("Database error: {e}"),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
