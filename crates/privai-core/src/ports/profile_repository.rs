//! Profile repository port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::StoreError;
use crate::domain::{Profile, ProfileUpdate, Session};

/// Profile storage keyed by the session's subject.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the user's profile. `None` when no row exists yet.
    async fn get(&self, session: &Session) -> Result<Option<Profile>, StoreError>;

    /// Write the editable fields and the `updated_at` stamp.
    async fn update(
        &self,
        session: &Session,
        update: &ProfileUpdate,
        updated_at: DateTime<Utc>,
    ) -> Result<Profile, StoreError>;
}
