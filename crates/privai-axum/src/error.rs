//! Axum-specific error types and mappings.
//!
//! Maps core errors onto HTTP status codes and a JSON body
//! `{ "error": ..., "status": ... }`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use privai_core::{AuthError, CompletionError, CoreError, StoreError};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Bad request (invalid input, unknown model).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No session, or the identity provider rejected the credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The identity provider or store is unreachable.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The upstream completion server failed before streaming.
    #[error("Upstream error: {message}")]
    Upstream {
        message: String,
        upstream_status: Option<u16>,
    },

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
    /// Status reported by the upstream server, when it answered at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    upstream_status: Option<u16>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message, upstream_status) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg, None),
            Self::Upstream {
                message,
                upstream_status,
            } => (StatusCode::INTERNAL_SERVER_ERROR, message, upstream_status),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %message, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %message, "Request rejected");
        }

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
            upstream_status,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<CompletionError> for HttpError {
    fn from(err: CompletionError) -> Self {
        if err.is_client_error() {
            return Self::BadRequest(err.to_string());
        }
        let upstream_status = match &err {
            CompletionError::UpstreamStatus { status, .. } => Some(*status),
            _ => None,
        };
        Self::Upstream {
            message: err.to_string(),
            upstream_status,
        }
    }
}

/// Malformed, mistyped or wrongly declared JSON bodies.
impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<StoreError> for HttpError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => Self::NotFound(msg),
            StoreError::Unauthorized(msg) => Self::Unauthorized(msg),
            StoreError::Rejected(msg) => Self::BadRequest(msg),
            StoreError::Storage(msg) => Self::ServiceUnavailable(format!("Store: {msg}")),
            StoreError::Serialization(msg) => Self::Internal(format!("Serialization: {msg}")),
        }
    }
}

impl From<AuthError> for HttpError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials(msg) => Self::Unauthorized(msg),
            AuthError::Unavailable(msg) => Self::ServiceUnavailable(msg),
            AuthError::Protocol(msg) => Self::Internal(msg),
        }
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Store(e) => e.into(),
            CoreError::Auth(e) => e.into(),
            CoreError::Completion(e) => e.into(),
            CoreError::Configuration(e) => Self::Internal(format!("Config: {e}")),
            CoreError::Validation(msg) => Self::BadRequest(msg),
        }
    }
}
