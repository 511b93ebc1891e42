//! Identity provider port.
//!
//! The provider owns sessions. This system only asks "who is the current
//! user for these credentials?" and forwards whatever cookie refreshes the
//! provider asks for.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{CookieUpdate, Credentials, SessionLookup, SignInForm};

/// Errors reported by the identity provider.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The provider rejected the credentials.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The provider could not be reached or answered unexpectedly.
    ///
    /// For session lookups this is indeterminate and callers treat it as
    /// "no session".
    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),

    /// The provider's response could not be understood.
    #[error("Unexpected identity provider response: {0}")]
    Protocol(String),
}

/// Port for the external identity provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolve the current user for a request's credentials.
    ///
    /// An anonymous request yields `Ok` with no session. Token refreshes done
    /// during the lookup are reported in [`SessionLookup::refreshed`].
    async fn current_user(&self, credentials: &Credentials) -> Result<SessionLookup, AuthError>;

    /// Exchange e-mail and password for a session and its cookies.
    async fn sign_in_with_password(&self, form: &SignInForm) -> Result<SessionLookup, AuthError>;

    /// Revoke the session behind `credentials` and return the cookies to clear.
    async fn sign_out(&self, credentials: &Credentials) -> Result<Vec<CookieUpdate>, AuthError>;
}
