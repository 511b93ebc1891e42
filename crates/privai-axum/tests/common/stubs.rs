//! In-memory stand-ins for the identity provider and store.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use privai_core::{
    AuthError, AuthProvider, CookieUpdate, Credentials, Profile, ProfileRepository,
    ProfileUpdate, Project, ProjectRepository, Session, SessionLookup, SignInForm, StoreError,
};

pub fn user_session(access_token: &str) -> Session {
    Session {
        subject: "user-1".into(),
        email: Some("ada@example.com".into()),
        access_token: access_token.into(),
    }
}

/// Identity provider keyed on the access-token cookie value:
///
/// - `valid`: signed in
/// - `expired` with refresh token `refresh-1`: signed in, cookies refreshed
/// - `boom`: provider failure
/// - anything else: anonymous
#[derive(Default)]
pub struct StubAuth {
    lookups: AtomicUsize,
}

impl StubAuth {
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthProvider for StubAuth {
    async fn current_user(&self, credentials: &Credentials) -> Result<SessionLookup, AuthError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let access = credentials
            .bearer()
            .or_else(|| credentials.cookie("sb-access-token"));

        match access {
            Some("valid") => Ok(SessionLookup::authenticated(user_session("valid"))),
            Some("boom") => Err(AuthError::Unavailable("connection refused".into())),
            Some("expired") if credentials.cookie("sb-refresh-token") == Some("refresh-1") => {
                Ok(SessionLookup::authenticated(user_session("renewed")).with_refreshed(vec![
                    CookieUpdate::set("sb-access-token", "renewed", Some(3600)),
                    CookieUpdate::set("sb-refresh-token", "refresh-2", Some(2_592_000)),
                ]))
            }
            _ => Ok(SessionLookup::anonymous()),
        }
    }

    async fn sign_in_with_password(&self, form: &SignInForm) -> Result<SessionLookup, AuthError> {
        if form.email == "ada@example.com" && form.password == "correct-horse" {
            Ok(SessionLookup::authenticated(user_session("valid")).with_refreshed(vec![
                CookieUpdate::set("sb-access-token", "valid", Some(3600)),
                CookieUpdate::set("sb-refresh-token", "refresh-1", Some(2_592_000)),
            ]))
        } else {
            Err(AuthError::InvalidCredentials("Invalid login credentials".into()))
        }
    }

    async fn sign_out(&self, _credentials: &Credentials) -> Result<Vec<CookieUpdate>, AuthError> {
        Ok(vec![
            CookieUpdate::clear("sb-access-token"),
            CookieUpdate::clear("sb-refresh-token"),
        ])
    }
}

/// Projects scoped by session subject.
#[derive(Default)]
pub struct InMemoryProjects {
    rows: Mutex<Vec<(String, Project)>>,
}

#[async_trait]
impl ProjectRepository for InMemoryProjects {
    async fn list(&self, session: &Session) -> Result<Vec<Project>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|(owner, _)| *owner == session.subject)
            .map(|(_, p)| p.clone())
            .collect())
    }

    async fn create(&self, session: &Session, name: &str) -> Result<Project, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let project = Project {
            id: i64::try_from(rows.len()).unwrap() + 1,
            name: name.to_string(),
        };
        rows.push((session.subject.clone(), project.clone()));
        Ok(project)
    }

    async fn rename(&self, session: &Session, id: i64, name: &str) -> Result<Project, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let (_, project) = rows
            .iter_mut()
            .find(|(owner, p)| *owner == session.subject && p.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("project {id}")))?;
        project.name = name.to_string();
        Ok(project.clone())
    }
}

/// Profiles keyed by session subject.
#[derive(Default)]
pub struct InMemoryProfiles {
    rows: Mutex<HashMap<String, Profile>>,
}

#[async_trait]
impl ProfileRepository for InMemoryProfiles {
    async fn get(&self, session: &Session) -> Result<Option<Profile>, StoreError> {
        Ok(self.rows.lock().unwrap().get(&session.subject).cloned())
    }

    async fn update(
        &self,
        session: &Session,
        update: &ProfileUpdate,
        updated_at: DateTime<Utc>,
    ) -> Result<Profile, StoreError> {
        let profile = Profile {
            full_name: update.full_name.clone(),
            username: update.username.clone(),
            website: update.website.clone(),
            avatar_url: update.avatar_url.clone(),
            updated_at: Some(updated_at),
        };
        self.rows
            .lock()
            .unwrap()
            .insert(session.subject.clone(), profile.clone());
        Ok(profile)
    }
}
