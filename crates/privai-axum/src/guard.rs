//! Route guard and session middleware.
//!
//! [`route_guard`] runs on every request. Paths outside the guarded set pass
//! straight through; for the rest the session is resolved and the request is
//! either let through or redirected (307). Cookies refreshed during the
//! lookup are attached to whatever response comes out.
//!
//! [`document_guard`] wraps static file serving. An HTML response for a
//! request that [`route_guard`] did not clear (the SPA fallback for an
//! unknown path, `index.html` under any spelling) is judged as the home page.
//!
//! [`require_session`] protects JSON endpoints: no session is a 401, and the
//! session is handed to the handler as a request extension.

use axum::{
    extract::{Request, State},
    http::{
        HeaderMap, HeaderValue,
        header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE},
    },
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use privai_core::domain::route::HOME_PATH;
use privai_core::{CookieUpdate, Credentials, GateOutcome};
use tracing::{debug, warn};

use crate::error::HttpError;
use crate::state::AppState;

/// Lift cookies and the bearer token from request headers, unchanged.
pub fn credentials_from(headers: &HeaderMap) -> Credentials {
    let cookies = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok());
    let authorization = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    Credentials::from_headers(cookies, authorization)
}

/// Add `Set-Cookie` headers for `cookies` ahead of any the handler already set,
/// so the handler's cookies win.
pub fn apply_cookies(headers: &mut HeaderMap, cookies: &[CookieUpdate]) {
    if cookies.is_empty() {
        return;
    }
    let existing: Vec<HeaderValue> = headers.get_all(SET_COOKIE).iter().cloned().collect();
    headers.remove(SET_COOKIE);

    for cookie in cookies {
        match HeaderValue::from_str(&cookie.to_string()) {
            Ok(value) => {
                headers.append(SET_COOKIE, value);
            }
            Err(e) => warn!(cookie = %cookie.name, error = %e, "Dropping unrepresentable cookie"),
        }
    }
    for value in existing {
        headers.append(SET_COOKIE, value);
    }
}

/// Request extension set once the guard has allowed a guarded page.
#[derive(Debug, Clone, Copy)]
struct PageCleared;

async fn enforce(outcome: GateOutcome, mut req: Request, next: Next) -> Response {
    let GateOutcome::Decided {
        decision,
        refreshed,
    } = outcome
    else {
        return next.run(req).await;
    };

    let mut response = match decision.redirect_target() {
        None => {
            req.extensions_mut().insert(PageCleared);
            next.run(req).await
        }
        Some(target) => redirect(req.uri().path(), target),
    };
    apply_cookies(response.headers_mut(), &refreshed);
    response
}

fn redirect(path: &str, target: &'static str) -> Response {
    debug!(path = %path, location = target, "Redirecting");
    Redirect::temporary(target).into_response()
}

fn is_html(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("text/html"))
}

/// Guard middleware for page routes.
pub async fn route_guard(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let credentials = credentials_from(req.headers());
    let outcome = state.gate.check(req.uri().path(), &credentials).await;
    enforce(outcome, req, next).await
}

/// Guard middleware for static file serving.
pub async fn document_guard(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if req.extensions().get::<PageCleared>().is_some() {
        return next.run(req).await;
    }
    let credentials = credentials_from(req.headers());
    let path = req.uri().path().to_owned();

    let response = next.run(req).await;
    if !is_html(&response) {
        return response;
    }

    match state.gate.check(HOME_PATH, &credentials).await {
        GateOutcome::Bypass => response,
        GateOutcome::Decided {
            decision,
            refreshed,
        } => {
            let mut response = match decision.redirect_target() {
                None => response,
                Some(target) => redirect(&path, target),
            };
            apply_cookies(response.headers_mut(), &refreshed);
            response
        }
    }
}

/// Session middleware for JSON endpoints.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let credentials = credentials_from(req.headers());
    let lookup = state.gate.lookup(&credentials).await;

    let mut response = match lookup.session {
        Some(session) => {
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        None => {
            HttpError::Unauthorized(format!("sign in required for {}", req.uri().path()))
                .into_response()
        }
    };
    apply_cookies(response.headers_mut(), &lookup.refreshed);
    response
}
