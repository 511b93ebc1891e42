//! Profile handlers (`/api/profile`).

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::{Extension, Json};
use privai_core::{Profile, ProfileUpdate, Session};

use crate::error::HttpError;
use crate::state::AppState;

/// Get the user's profile. Empty when no row exists yet.
pub async fn get(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<Profile>, HttpError> {
    Ok(Json(state.accounts.profile(&session).await?))
}

/// Update the user's profile.
pub async fn update(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<Json<Profile>, HttpError> {
    let Json(req) = payload?;
    Ok(Json(state.accounts.update_profile(&session, req).await?))
}
