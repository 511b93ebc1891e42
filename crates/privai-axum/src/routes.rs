//! Route definitions and router construction.
//!
//! The route guard wraps the whole router; it only looks at the guarded page
//! paths and lets everything else through untouched. JSON endpoints that need
//! a user sit behind [`require_session`] instead.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::middleware;
use axum::routing::{MethodRouter, get, get_service, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::guard::{document_guard, require_session, route_guard};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// API routes without the `/api` prefix (nested under `/api` by the caller).
pub(crate) fn api_routes(state: AppState) -> Router<AppState> {
    let account = Router::new()
        .route(
            "/inference",
            get(handlers::projects::list)
                .post(handlers::projects::create)
                .patch(handlers::projects::rename),
        )
        .route(
            "/profile",
            get(handlers::profile::get).put(handlers::profile::update),
        )
        .route_layer(middleware::from_fn_with_state(state, require_session));

    Router::new()
        .route(
            "/chat-private-ai",
            post(handlers::completion::proxy_completion),
        )
        .route("/auth/sign-in", post(handlers::auth::sign_in))
        .merge(account)
}

fn base_router(state: &AppState, cors_config: &CorsConfig) -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/signout", get(handlers::auth::sign_out))
        .nest(
            "/api",
            api_routes(Arc::clone(state)).layer(build_cors_layer(cors_config)),
        )
}

fn finish(router: Router<AppState>, state: AppState) -> Router {
    router
        .layer(middleware::from_fn_with_state(Arc::clone(&state), route_guard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Create the main router: health, API and sign-out, all behind the guard.
///
/// Guarded page paths with no handler fall through to a 404 once the guard
/// lets them pass. Use [`create_spa_router`] to serve the UI.
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    finish(base_router(&state, cors_config), state)
}

/// Create a router with API routes and static asset serving.
///
/// Files under `static_dir` are served as they are and every other path gets
/// `index.html` for client-side routing. All of it sits behind
/// [`document_guard`]: an HTML response for a page the route guard did not
/// clear is treated as the home page, so no spelling of a path hands a
/// document to a visitor without a session. Scripts, styles and images stay
/// public.
pub fn create_spa_router<P: AsRef<Path>>(
    ctx: AxumContext,
    static_dir: P,
    cors_config: &CorsConfig,
) -> Router {
    let state: AppState = Arc::new(ctx);
    let static_path = static_dir.as_ref();

    // Directories are not indexed; they fall through to the document.
    let serve_dir = ServeDir::new(static_path)
        .append_index_html_on_directories(false)
        .fallback(ServeFile::new(static_path.join("index.html")));

    let static_files: MethodRouter = get_service(serve_dir)
        .layer(middleware::from_fn_with_state(Arc::clone(&state), document_guard));

    let router = base_router(&state, cors_config).fallback_service(static_files);
    finish(router, state)
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
