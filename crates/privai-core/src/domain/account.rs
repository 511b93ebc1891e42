//! Account domain types: password sign-in and the user profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ports::CoreError;
use crate::utils::validation::{
    is_valid_email, validate_password, validate_username, validate_website,
};

/// Password sign-in form.
#[derive(Clone, Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SignInForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInForm")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl SignInForm {
    pub fn validate(&self) -> Result<(), CoreError> {
        if !is_valid_email(self.email.trim()) {
            return Err(CoreError::Validation("email must be a valid address".into()));
        }
        validate_password(&self.password).map_err(CoreError::Validation)
    }
}

/// A user's profile row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Editable profile fields. Blank strings are normalised to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    /// Trim fields, drop blanks and validate what remains.
    pub fn normalized(self) -> Result<Self, CoreError> {
        let clean = |v: Option<String>| {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        };
        let update = Self {
            full_name: clean(self.full_name),
            username: clean(self.username),
            website: clean(self.website),
            avatar_url: clean(self.avatar_url),
        };

        if let Some(username) = &update.username {
            validate_username(username).map_err(CoreError::Validation)?;
        }
        if let Some(website) = &update.website {
            validate_website(website).map_err(CoreError::Validation)?;
        }
        Ok(update)
    }
}
