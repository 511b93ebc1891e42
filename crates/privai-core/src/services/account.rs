//! Account service: profile and project operations on behalf of a session.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{
    NewProject, Profile, ProfileUpdate, Project, ProjectRename, Session, normalize_project_name,
};
use crate::ports::{CoreError, ProfileRepository, ProjectRepository};

pub struct AccountService {
    profiles: Arc<dyn ProfileRepository>,
    projects: Arc<dyn ProjectRepository>,
}

impl AccountService {
    pub fn new(profiles: Arc<dyn ProfileRepository>, projects: Arc<dyn ProjectRepository>) -> Self {
        Self { profiles, projects }
    }

    /// The user's profile; an empty profile when no row exists yet.
    pub async fn profile(&self, session: &Session) -> Result<Profile, CoreError> {
        Ok(self.profiles.get(session).await?.unwrap_or_default())
    }

    pub async fn update_profile(
        &self,
        session: &Session,
        update: ProfileUpdate,
    ) -> Result<Profile, CoreError> {
        let update = update.normalized()?;
        Ok(self.profiles.update(session, &update, Utc::now()).await?)
    }

    pub async fn projects(&self, session: &Session) -> Result<Vec<Project>, CoreError> {
        Ok(self.projects.list(session).await?)
    }

    pub async fn create_project(
        &self,
        session: &Session,
        project: NewProject,
    ) -> Result<Project, CoreError> {
        let name = normalize_project_name(&project.name)?;
        Ok(self.projects.create(session, &name).await?)
    }

    pub async fn rename_project(
        &self,
        session: &Session,
        rename: ProjectRename,
    ) -> Result<Project, CoreError> {
        let name = normalize_project_name(&rename.name)?;
        Ok(self.projects.rename(session, rename.id, &name).await?)
    }
}
