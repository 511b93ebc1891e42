//! Shared fixtures for the privai-axum integration tests.
#![allow(dead_code)]

pub mod stubs;
pub mod upstream;

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use privai_axum::{
    AppDeps, AxumContext, CorsConfig, LlamaCompletionClient, create_router, create_spa_router,
};
use privai_core::{CompletionBackend, GuardPolicy, ModelRegistry};
use tower::ServiceExt;

use stubs::{InMemoryProfiles, InMemoryProjects, StubAuth};

/// Cookie header for a signed-in user.
pub const SIGNED_IN: &str = "sb-access-token=valid";
/// Cookie header whose access token has expired but can be refreshed.
pub const EXPIRED: &str = "sb-access-token=expired; sb-refresh-token=refresh-1";
/// Cookie header that makes the identity provider fail.
pub const PROVIDER_DOWN: &str = "sb-access-token=boom";

/// Test application with handles on its stubs.
pub struct TestApp {
    pub router: Router,
    pub auth: Arc<StubAuth>,
}

impl TestApp {
    /// Router wired to stubs, routing `privateAI` to `upstream_url`.
    pub fn new(upstream_url: &str) -> Self {
        let client = LlamaCompletionClient::new().unwrap();
        Self::with_backend(upstream_url, Arc::new(client))
    }

    pub fn with_backend(upstream_url: &str, backend: Arc<dyn CompletionBackend>) -> Self {
        let (ctx, auth) = context(upstream_url, backend);
        Self {
            router: create_router(ctx, &CorsConfig::AllowAll),
            auth,
        }
    }

    /// Router serving the front end from `static_dir`.
    pub fn spa(static_dir: &Path) -> Self {
        let client = LlamaCompletionClient::new().unwrap();
        let (ctx, auth) = context("http://127.0.0.1:9", Arc::new(client));
        Self {
            router: create_spa_router(ctx, static_dir, &CorsConfig::AllowAll),
            auth,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

fn context(
    upstream_url: &str,
    backend: Arc<dyn CompletionBackend>,
) -> (AxumContext, Arc<StubAuth>) {
    let auth = Arc::new(StubAuth::default());
    let deps = AppDeps {
        auth: auth.clone(),
        profiles: Arc::new(InMemoryProfiles::default()),
        projects: Arc::new(InMemoryProjects::default()),
        completions: backend,
    };
    let models = ModelRegistry::from_entries([("privateAI", upstream_url)]).unwrap();
    (AxumContext::new(deps, models, GuardPolicy::default()), auth)
}

/// GET `path`, optionally with a `Cookie` header.
pub fn get(path: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// JSON request with an optional `Cookie` header.
pub fn json(
    method: &str,
    path: &str,
    cookie: Option<&str>,
    body: &serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// All `Set-Cookie` values on a response.
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response.headers().get("location").and_then(|v| v.to_str().ok())
}
