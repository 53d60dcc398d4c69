//! # HTTP API Errors
//!
//! Every failure leaves the server as `{"error": <message>, "code": <status>}`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::error::ServiceError;

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body missing, not JSON, or wrong shape
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("{0}")]
    Service(#[from] ServiceError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Service(err) => StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<crate::error::ValidationError> for ApiError {
    fn from(err: crate::error::ValidationError) -> Self {
        ApiError::Service(err.into())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
