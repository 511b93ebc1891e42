//! Local stand-ins for the inference server.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use bytes::Bytes;
use futures_util::{StreamExt, stream};
use privai_core::{
    CompletionBackend, CompletionBody, CompletionError, CompletionStream, UpstreamEndpoint,
};
use serde_json::Value;

/// What the fake inference server saw.
#[derive(Clone, Default)]
pub struct Captured {
    pub body: Arc<Mutex<Option<Value>>>,
    pub accept: Arc<Mutex<Option<String>>>,
}

impl Captured {
    pub fn body(&self) -> Option<Value> {
        self.body.lock().unwrap().clone()
    }

    pub fn accept(&self) -> Option<String> {
        self.accept.lock().unwrap().clone()
    }
}

#[derive(Clone)]
struct Fake {
    captured: Captured,
    chunks: Vec<&'static str>,
}

async fn completion(
    State(fake): State<Fake>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    *fake.captured.body.lock().unwrap() = Some(body);
    *fake.captured.accept.lock().unwrap() = headers
        .get("accept")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let chunks = stream::iter(fake.chunks).then(|chunk| async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        Ok::<_, Infallible>(Bytes::from_static(chunk.as_bytes()))
    });

    Response::builder()
        .header("content-type", "text/event-stream")
        .body(Body::from_stream(chunks))
        .unwrap()
}

async fn overloaded() -> impl IntoResponse {
    (StatusCode::SERVICE_UNAVAILABLE, "model loading")
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Start a fake inference server streaming `chunks` from `/completion`.
pub async fn spawn_streaming(chunks: Vec<&'static str>) -> (String, Captured) {
    let captured = Captured::default();
    let fake = Fake {
        captured: captured.clone(),
        chunks,
    };
    let app = Router::new()
        .route("/completion", post(completion))
        .with_state(fake);
    let addr = spawn(app).await;
    (format!("http://{addr}"), captured)
}

/// Start a fake inference server that answers 503.
pub async fn spawn_overloaded() -> String {
    let app = Router::new().route("/completion", post(overloaded));
    format!("http://{}", spawn(app).await)
}

/// Sets its flag when dropped, i.e. when the server stops streaming.
struct ClosedFlag(Arc<AtomicBool>);

impl Drop for ClosedFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Start a fake inference server that streams forever. The flag flips once
/// the server drops the response stream, which happens when the client goes
/// away.
pub async fn spawn_endless() -> (String, Arc<AtomicBool>) {
    let closed = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&closed);

    let app = Router::new().route(
        "/completion",
        post(move || {
            let guard = ClosedFlag(Arc::clone(&flag));
            async move {
                let ticks = stream::unfold(guard, |guard| async move {
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    Some((Ok::<_, Infallible>(Bytes::from_static(b"data: tick\n\n")), guard))
                });
                Body::from_stream(ticks)
            }
        }),
    );
    (format!("http://{}", spawn(app).await), closed)
}

/// A base URL nothing is listening on.
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// In-process backend yielding fixed chunks, for exact framing checks.
pub struct ScriptedBackend {
    pub chunks: Vec<Result<&'static str, &'static str>>,
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn stream_completion(
        &self,
        _endpoint: &UpstreamEndpoint,
        _body: &CompletionBody,
    ) -> Result<CompletionStream, CompletionError> {
        let items: Vec<Result<Bytes, CompletionError>> = self
            .chunks
            .iter()
            .map(|c| match c {
                Ok(data) => Ok(Bytes::from_static(data.as_bytes())),
                Err(msg) => Err(CompletionError::MidStream((*msg).to_string())),
            })
            .collect();
        Ok(Box::pin(stream::iter(items)))
    }
}
