//! Supabase adapter errors and their mapping onto core port errors.

use privai_core::{AuthError, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SupabaseError {
    /// Transport failure (DNS, connect, TLS, timeout).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Supabase answered with a non-success status.
    #[error("status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl SupabaseError {
    /// Build a status error from a response body, preferring Supabase's own message fields.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                ["error_description", "msg", "message", "error"]
                    .iter()
                    .find_map(|k| v.get(*k).and_then(|m| m.as_str()).map(str::to_string))
            })
            .unwrap_or_else(|| body.trim().to_string());
        Self::Status { status, message }
    }

    /// The credentials were rejected (as opposed to the service failing).
    pub(crate) const fn is_rejection(&self) -> bool {
        matches!(self, Self::Status { status: 400 | 401 | 403, .. })
    }
}

impl From<SupabaseError> for AuthError {
    fn from(err: SupabaseError) -> Self {
        match err {
            e if e.is_rejection() => Self::InvalidCredentials(e.to_string()),
            SupabaseError::Decode(msg) => Self::Protocol(msg),
            e => Self::Unavailable(e.to_string()),
        }
    }
}

impl From<SupabaseError> for StoreError {
    fn from(err: SupabaseError) -> Self {
        match err {
            SupabaseError::Status { status: 404, message } => Self::NotFound(message),
            SupabaseError::Status {
                status: 401 | 403,
                message,
            } => Self::Unauthorized(message),
            SupabaseError::Status {
                status: 400 | 409,
                message,
            } => Self::Rejected(message),
            SupabaseError::Decode(msg) => Self::Serialization(msg),
            e => Self::Storage(e.to_string()),
        }
    }
}
