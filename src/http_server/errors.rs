//! # API Errors
//!
//! Translates validation, not-found and internal failures into JSON error
//! bodies with the matching status code.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::property::{PropertyId, ValidationError};

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// One message per violated constraint
    #[error("Validation error: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Unknown property or route
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request body over the extractor's size limit
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// `message` goes to the client, `cause` only to the log
    #[error("{message}: {cause}")]
    Internal { message: String, cause: String },
}

impl ApiError {
    pub fn property_not_found(id: PropertyId) -> Self {
        ApiError::NotFound(format!("Property with ID {} does not exist", id))
    }

    /// Fallback for unmatched paths and methods
    pub fn route_not_found(uri: &Uri) -> Self {
        let target = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| uri.path());
        ApiError::NotFound(format!("Route {} not found", target))
    }

    pub fn internal(message: impl Into<String>, cause: impl ToString) -> Self {
        ApiError::Internal {
            message: message.into(),
            cause: cause.to_string(),
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.into_details())
    }
}

/// Oversized bodies keep their 413; every other body rejection (bad JSON,
/// wrong content type) is reported as a validation error.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::PayloadTooLarge(rejection.body_text());
        }
        ApiError::Validation(vec![rejection.body_text()])
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(vec![rejection.body_text()])
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(vec![rejection.body_text()])
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Validation(details) => Self {
                error: "Validation error",
                message: None,
                details: Some(details),
            },
            ApiError::NotFound(message) => Self {
                error: "Not Found",
                message: Some(message),
                details: None,
            },
            ApiError::PayloadTooLarge(message) => Self {
                error: "Payload Too Large",
                message: Some(message),
                details: None,
            },
            ApiError::Internal { message, .. } => Self {
                error: "Internal server error",
                message: Some(message),
                details: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal { message, cause } = &self {
            error!(%cause, "{}", message);
        }

        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
