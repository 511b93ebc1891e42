//! Project repository port.

use async_trait::async_trait;

use super::StoreError;
use crate::domain::{Project, Session};

/// Per-user project storage. Every call acts on behalf of `session`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// List the user's projects.
    async fn list(&self, session: &Session) -> Result<Vec<Project>, StoreError>;

    /// Create a project owned by the user.
    async fn create(&self, session: &Session, name: &str) -> Result<Project, StoreError>;

    /// Rename one of the user's projects. Unknown ids yield [`StoreError::NotFound`].
    async fn rename(&self, session: &Session, id: i64, name: &str) -> Result<Project, StoreError>;
}
