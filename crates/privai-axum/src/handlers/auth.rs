//! Sign-in and sign-out handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use privai_core::domain::route::SIGN_IN_PATH;
use privai_core::SignInForm;
use tracing::{info, warn};

use crate::error::HttpError;
use crate::guard::{apply_cookies, credentials_from};
use crate::state::AppState;

/// Password sign-in.
///
/// POST /api/auth/sign-in
///
/// Returns the signed-in identity and sets the session cookies.
pub async fn sign_in(
    State(state): State<AppState>,
    payload: Result<Json<SignInForm>, JsonRejection>,
) -> Result<Response, HttpError> {
    let Json(form) = payload?;
    form.validate()?;

    let lookup = state.auth.sign_in_with_password(&form).await?;
    let Some(session) = lookup.session else {
        return Err(HttpError::Unauthorized("sign in did not yield a session".into()));
    };

    info!(subject = %session.subject, "User signed in");
    let mut response = Json(session).into_response();
    apply_cookies(response.headers_mut(), &lookup.refreshed);
    Ok(response)
}

/// Sign out and return to the sign-in page.
///
/// GET /signout
pub async fn sign_out(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let credentials = credentials_from(&headers);

    let cleared = match state.auth.sign_out(&credentials).await {
        Ok(cookies) => cookies,
        Err(e) => {
            warn!(error = %e, "Sign out failed");
            Vec::new()
        }
    };

    let mut response = Redirect::temporary(SIGN_IN_PATH).into_response();
    apply_cookies(response.headers_mut(), &cleared);
    response
}
