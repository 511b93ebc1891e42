//! Completion backend port.
//!
//! Abstracts the upstream text-generation server. Implementations issue one
//! streaming request per call and hand back the raw body as a byte stream;
//! they never parse or re-frame it.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures_core::Stream;
use thiserror::Error;

use crate::domain::{CompletionBody, UpstreamEndpoint};

/// Raw upstream response body, chunk by chunk, in arrival order.
///
/// Dropping the stream releases the upstream connection.
pub type CompletionStream = Pin<Box<dyn Stream<Item = Result<Bytes, CompletionError>> + Send>>;

/// Errors that can occur while proxying a completion.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The request body was malformed or incomplete. Never retried.
    #[error("Invalid completion request: {0}")]
    InvalidRequest(String),

    /// No upstream endpoint is registered for the model identifier.
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    /// The upstream server could not be reached.
    #[error("Upstream connection failed: {0}")]
    UpstreamConnection(String),

    /// The upstream server answered with a non-success status before streaming.
    #[error("Upstream returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// The upstream connection failed after streaming started.
    #[error("Upstream stream interrupted: {0}")]
    MidStream(String),
}

impl CompletionError {
    /// Whether the caller is at fault (bad input) rather than the upstream.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_) | Self::UnknownModel(_))
    }
}

/// Port for the upstream completion server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Start a streaming completion against `endpoint`.
    ///
    /// Returns once the upstream has accepted the request and response headers
    /// are in; the body is delivered through the returned stream.
    async fn stream_completion(
        &self,
        endpoint: &UpstreamEndpoint,
        body: &CompletionBody,
    ) -> Result<CompletionStream, CompletionError>;
}
