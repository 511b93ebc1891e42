//! `AuthProvider` over the Supabase auth API (`auth/v1`).

use async_trait::async_trait;
use privai_core::{
    AuthError, AuthProvider, CookieUpdate, Credentials, Session, SessionLookup, SignInForm,
};
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::client::{SupabaseClient, send_empty, send_json};
use crate::error::SupabaseError;

/// `auth/v1/user` response (only the fields used here).
#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// `auth/v1/token` grant response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    user: UserResponse,
}

impl SupabaseClient {
    async fn fetch_user(&self, access_token: &str) -> Result<Session, SupabaseError> {
        let request = self.request(Method::GET, "auth/v1/user", Some(access_token));
        let user: UserResponse = send_json(request).await?;
        Ok(Session {
            subject: user.id,
            email: user.email,
            access_token: access_token.to_string(),
        })
    }

    async fn grant(
        &self,
        grant_type: &str,
        body: serde_json::Value,
    ) -> Result<TokenResponse, SupabaseError> {
        let request = self
            .request(Method::POST, "auth/v1/token", None)
            .query(&[("grant_type", grant_type)])
            .json(&body);
        send_json(request).await
    }

    /// Turn a token grant into a session plus the cookies that persist it.
    fn session_from_grant(&self, token: TokenResponse) -> SessionLookup {
        let config = &self.config;
        let cookies = vec![
            CookieUpdate::set(&config.access_cookie, &token.access_token, token.expires_in)
                .secure(config.secure_cookies),
            CookieUpdate::set(
                &config.refresh_cookie,
                token.refresh_token,
                Some(config.refresh_max_age_secs),
            )
            .secure(config.secure_cookies),
        ];
        let session = Session {
            subject: token.user.id,
            email: token.user.email,
            access_token: token.access_token,
        };
        SessionLookup::authenticated(session).with_refreshed(cookies)
    }

    fn clear_cookies(&self) -> Vec<CookieUpdate> {
        let secure = self.config.secure_cookies;
        vec![
            CookieUpdate::clear(&self.config.access_cookie).secure(secure),
            CookieUpdate::clear(&self.config.refresh_cookie).secure(secure),
        ]
    }

    fn access_token<'a>(&self, credentials: &'a Credentials) -> Option<&'a str> {
        credentials
            .bearer()
            .or_else(|| credentials.cookie(&self.config.access_cookie))
            .filter(|t| !t.is_empty())
    }
}

#[async_trait]
impl AuthProvider for SupabaseClient {
    async fn current_user(&self, credentials: &Credentials) -> Result<SessionLookup, AuthError> {
        if let Some(token) = self.access_token(credentials) {
            match self.fetch_user(token).await {
                Ok(session) => return Ok(SessionLookup::authenticated(session)),
                Err(e) if e.is_rejection() => {
                    debug!(error = %e, "Access token rejected, trying refresh");
                }
                Err(e) => return Err(e.into()),
            }
        }

        let Some(refresh_token) = credentials
            .cookie(&self.config.refresh_cookie)
            .filter(|t| !t.is_empty())
        else {
            return Ok(SessionLookup::anonymous());
        };

        match self
            .grant("refresh_token", json!({ "refresh_token": refresh_token }))
            .await
        {
            Ok(token) => {
                debug!(subject = %token.user.id, "Session refreshed");
                Ok(self.session_from_grant(token))
            }
            Err(e) if e.is_rejection() => {
                debug!(error = %e, "Refresh token rejected, clearing session cookies");
                Ok(SessionLookup::anonymous().with_refreshed(self.clear_cookies()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn sign_in_with_password(&self, form: &SignInForm) -> Result<SessionLookup, AuthError> {
        let token = self
            .grant(
                "password",
                json!({ "email": form.email.trim(), "password": form.password }),
            )
            .await?;
        Ok(self.session_from_grant(token))
    }

    async fn sign_out(&self, credentials: &Credentials) -> Result<Vec<CookieUpdate>, AuthError> {
        if let Some(token) = self.access_token(credentials) {
            let request = self.request(Method::POST, "auth/v1/logout", Some(token));
            if let Err(e) = send_empty(request).await {
                warn!(error = %e, "Supabase logout failed; clearing cookies anyway");
            }
        }
        Ok(self.clear_cookies())
    }
}
