//! Inference project handlers (`/api/inference`).

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::{Extension, Json};
use privai_core::{NewProject, Project, ProjectRename, Session};

use crate::error::HttpError;
use crate::state::AppState;

/// List the user's projects.
pub async fn list(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<Vec<Project>>, HttpError> {
    Ok(Json(state.accounts.projects(&session).await?))
}

/// Create a project.
pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    payload: Result<Json<NewProject>, JsonRejection>,
) -> Result<(StatusCode, Json<Project>), HttpError> {
    let Json(req) = payload?;
    let project = state.accounts.create_project(&session, req).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// Rename a project.
pub async fn rename(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    payload: Result<Json<ProjectRename>, JsonRejection>,
) -> Result<Json<Project>, HttpError> {
    let Json(req) = payload?;
    Ok(Json(state.accounts.rename_project(&session, req).await?))
}
