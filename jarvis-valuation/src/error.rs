//! Error types for jarvis-valuation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::valuation::{FieldViolation, ValidationReport};

/// Valuation service errors.
#[derive(Debug, thiserror::Error)]
pub enum ValuationError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationReport),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ValuationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<jarvis_common::Error> for ValuationError {
    fn from(err: jarvis_common::Error) -> Self {
        match err {
            jarvis_common::Error::InvalidInput(message) => Self::InvalidRequest(message),
            jarvis_common::Error::Internal(message) => Self::Internal(message),
        }
    }
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violations: Option<Vec<FieldViolation>>,
}

impl From<&ValuationError> for ApiError {
    fn from(err: &ValuationError) -> Self {
        let violations = match err {
            ValuationError::Validation(report) => Some(report.violations.clone()),
            _ => None,
        };
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
            violations,
        }
    }
}

impl IntoResponse for ValuationError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "success": false,
            "error": ApiError::from(&self),
        });

        (self.status_code(), axum::Json(body)).into_response()
    }
}
