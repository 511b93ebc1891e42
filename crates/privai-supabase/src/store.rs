//! Project and profile repositories over PostgREST (`rest/v1`).
//!
//! Every call carries the user's access token so row-level security applies.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use privai_core::{
    Profile, ProfileRepository, ProfileUpdate, Project, ProjectRepository, Session, StoreError,
};
use reqwest::Method;
use serde_json::json;

use crate::client::{SupabaseClient, send_json};

const PROJECTS: &str = "rest/v1/projects";
const PROFILES: &str = "rest/v1/profiles";
const PROFILE_COLUMNS: &str = "full_name,username,website,avatar_url,updated_at";

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

#[async_trait]
impl ProjectRepository for SupabaseClient {
    async fn list(&self, session: &Session) -> Result<Vec<Project>, StoreError> {
        let request = self
            .request(Method::GET, PROJECTS, Some(&session.access_token))
            .query(&[
                ("select", "id,name".to_string()),
                ("auth_id", eq(&session.subject)),
                ("order", "id.asc".to_string()),
            ]);
        Ok(send_json(request).await?)
    }

    async fn create(&self, session: &Session, name: &str) -> Result<Project, StoreError> {
        let request = self
            .request(Method::POST, PROJECTS, Some(&session.access_token))
            .header("Prefer", "return=representation")
            .json(&json!({ "name": name, "auth_id": session.subject }));
        let rows: Vec<Project> = send_json(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Serialization("insert returned no row".into()))
    }

    async fn rename(&self, session: &Session, id: i64, name: &str) -> Result<Project, StoreError> {
        let request = self
            .request(Method::PATCH, PROJECTS, Some(&session.access_token))
            .query(&[("id", eq(id)), ("auth_id", eq(&session.subject))])
            .header("Prefer", "return=representation")
            .json(&json!({ "name": name }));
        let rows: Vec<Project> = send_json(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(format!("project {id}")))
    }
}

#[async_trait]
impl ProfileRepository for SupabaseClient {
    async fn get(&self, session: &Session) -> Result<Option<Profile>, StoreError> {
        let request = self
            .request(Method::GET, PROFILES, Some(&session.access_token))
            .query(&[
                ("select", PROFILE_COLUMNS.to_string()),
                ("auth_id", eq(&session.subject)),
            ]);
        let rows: Vec<Profile> = send_json(request).await?;
        Ok(rows.into_iter().next())
    }

    async fn update(
        &self,
        session: &Session,
        update: &ProfileUpdate,
        updated_at: DateTime<Utc>,
    ) -> Result<Profile, StoreError> {
        let request = self
            .request(Method::POST, PROFILES, Some(&session.access_token))
            .query(&[("on_conflict", "auth_id")])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&json!({
                "auth_id": session.subject,
                "full_name": update.full_name,
                "username": update.username,
                "website": update.website,
                "avatar_url": update.avatar_url,
                "updated_at": updated_at,
            }));
        let rows: Vec<Profile> = send_json(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Serialization("upsert returned no row".into()))
    }
}
