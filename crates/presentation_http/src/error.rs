//! API error handling
//!
//! Error responses for the webhook routes. Bodies carry a short message and
//! a stable code, never upstream details.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use integration_whatsapp::WhatsAppError;
use serde::Serialize;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
}

impl ApiError {
    const fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = match self {
            Self::BadRequest(msg)
            | Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::ServiceUnavailable(msg) => msg,
            // Internal errors never leak details
            Self::Internal(_) => "An internal error occurred".to_string(),
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<WhatsAppError> for ApiError {
    fn from(err: WhatsAppError) -> Self {
        match err {
            WhatsAppError::InvalidSignature => Self::Unauthorized("Invalid signature".to_string()),
            WhatsAppError::Configuration(msg) => Self::ServiceUnavailable(msg),
            WhatsAppError::InvalidRecipient(msg) => Self::BadRequest(msg),
            WhatsAppError::Request(_) | WhatsAppError::Api { .. } => {
                Self::Internal(err.to_string())
            },
        }
    }
}
