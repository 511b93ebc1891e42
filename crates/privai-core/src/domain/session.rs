//! Session and credential types.
//!
//! A [`Session`] is owned by the external identity provider and resolved
//! freshly for every request. The types here carry the request's credential
//! material to the provider and the provider's cookie updates back out.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An authenticated identity as reported by the identity provider.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque subject identifier (the provider's user id).
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Bearer token for row-level-secured store calls made on the user's behalf.
    #[serde(skip_serializing)]
    pub access_token: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("subject", &self.subject)
            .field("email", &self.email)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Credential material lifted from an incoming request, passed through unchanged.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    cookies: Vec<(String, String)>,
    bearer: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.cookies.iter().map(|(n, _)| n.as_str()).collect();
        f.debug_struct("Credentials")
            .field("cookies", &names)
            .field("bearer", &self.bearer.is_some())
            .finish()
    }
}

impl Credentials {
    /// Build credentials from raw `Cookie` header values and an optional
    /// `Authorization` header value.
    pub fn from_headers<'a>(
        cookie_headers: impl IntoIterator<Item = &'a str>,
        authorization: Option<&str>,
    ) -> Self {
        let cookies = cookie_headers
            .into_iter()
            .flat_map(parse_cookie_header)
            .collect();

        let bearer = authorization
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Self { cookies, bearer }
    }

    /// Look up a cookie by name. The first occurrence wins.
    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Bearer token from the `Authorization` header, if any.
    #[must_use]
    pub fn bearer(&self) -> Option<&str> {
        self.bearer.as_deref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty() && self.bearer.is_none()
    }
}

fn parse_cookie_header(header: &str) -> Vec<(String, String)> {
    header
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            let value = value.trim().trim_matches('"');
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

/// A cookie the identity provider wants set (or cleared) on the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieUpdate {
    pub name: String,
    pub value: String,
    /// Lifetime in seconds. `Some(0)` clears the cookie, `None` makes it a session cookie.
    pub max_age: Option<i64>,
    pub secure: bool,
}

impl CookieUpdate {
    pub fn set(name: impl Into<String>, value: impl Into<String>, max_age: Option<i64>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            max_age,
            secure: false,
        }
    }

    /// A cookie update that removes `name` from the browser.
    pub fn clear(name: impl Into<String>) -> Self {
        Self::set(name, "", Some(0))
    }

    #[must_use]
    pub const fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }
}

impl fmt::Display for CookieUpdate {
    /// Renders the `Set-Cookie` header value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            self.name, self.value
        )?;
        if let Some(max_age) = self.max_age {
            write!(f, "; Max-Age={max_age}")?;
        }
        if self.secure {
            f.write_str("; Secure")?;
        }
        Ok(())
    }
}

/// Result of asking the identity provider for the current user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionLookup {
    pub session: Option<Session>,
    /// Cookies refreshed as a side effect of the lookup. Must reach the caller.
    pub refreshed: Vec<CookieUpdate>,
}

impl SessionLookup {
    /// A lookup that found no user and changed nothing.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn authenticated(session: Session) -> Self {
        Self {
            session: Some(session),
            refreshed: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_refreshed(mut self, cookies: Vec<CookieUpdate>) -> Self {
        self.refreshed = cookies;
        self
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}
