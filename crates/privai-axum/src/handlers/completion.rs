//! Completion proxy handler.
//!
//! Forwards a chat request to the inference server selected by its model
//! identifier and relays the upstream SSE body unmodified.

use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;
use privai_core::CompletionRequest;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::error::HttpError;
use crate::relay::RelayStream;
use crate::state::AppState;

/// Proxy a chat completion.
///
/// POST /api/chat-private-ai
///
/// The body is parsed by hand so malformed payloads map to a JSON 400 like
/// every other error. Nothing is sent upstream unless the payload is valid
/// and the model is registered.
pub async fn proxy_completion(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, HttpError> {
    let request_id = Uuid::new_v4();
    let request = CompletionRequest::from_json(&body)?;

    let span = info_span!(
        "completion",
        request_id = %request_id,
        model = %request.model.id(),
    );

    let upstream = state
        .completions
        .start(&request)
        .instrument(span.clone())
        .await?;

    span.in_scope(|| info!(messages = request.messages.len(), "Streaming completion"));

    let relay = RelayStream::new(upstream, state.shutdown.child_token(), span);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .header("x-accel-buffering", "no") // Disable nginx buffering
        .body(Body::from_stream(relay))
        .map_err(|e| HttpError::Internal(format!("Failed to build response: {e}")))
}
