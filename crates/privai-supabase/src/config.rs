//! Supabase connection settings.

use privai_core::ConfigError;
use url::Url;

/// Cookie carrying the access token (JWT).
pub const DEFAULT_ACCESS_COOKIE: &str = "sb-access-token";
/// Cookie carrying the refresh token.
pub const DEFAULT_REFRESH_COOKIE: &str = "sb-refresh-token";
/// Refresh cookie lifetime: 30 days.
pub const DEFAULT_REFRESH_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 30;

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyzcompany.supabase.co`.
    pub url: Url,
    /// Public anon key, sent as the `apikey` header on every call.
    pub anon_key: String,
    pub access_cookie: String,
    pub refresh_cookie: String,
    pub refresh_max_age_secs: i64,
    /// Mark session cookies `Secure`.
    pub secure_cookies: bool,
}

impl SupabaseConfig {
    /// Validate the project URL and key; cookie settings take their defaults.
    pub fn new(url: &str, anon_key: impl Into<String>) -> Result<Self, ConfigError> {
        let url = Url::parse(url.trim())
            .map_err(|e| ConfigError::Invalid(format!("invalid Supabase URL {url:?}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(ConfigError::Invalid(format!(
                "Supabase URL must be an http(s) URL with a host: {url}"
            )));
        }

        let anon_key = anon_key.into();
        if anon_key.trim().is_empty() {
            return Err(ConfigError::Missing("Supabase anon key".into()));
        }

        let secure_cookies = url.scheme() == "https";
        Ok(Self {
            url,
            anon_key,
            access_cookie: DEFAULT_ACCESS_COOKIE.into(),
            refresh_cookie: DEFAULT_REFRESH_COOKIE.into(),
            refresh_max_age_secs: DEFAULT_REFRESH_MAX_AGE_SECS,
            secure_cookies,
        })
    }

    /// Absolute URL for a path under the project URL, e.g. `auth/v1/user`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_applies_defaults() {
        let config = SupabaseConfig::new("https://abc.supabase.co", "anon").unwrap();
        assert_eq!(config.access_cookie, "sb-access-token");
        assert_eq!(config.refresh_cookie, "sb-refresh-token");
        assert!(config.secure_cookies);
        assert_eq!(
            config.endpoint("/auth/v1/user"),
            "https://abc.supabase.co/auth/v1/user"
        );
    }

    #[test]
    fn test_plain_http_is_not_secure() {
        let config = SupabaseConfig::new("http://127.0.0.1:54321", "anon").unwrap();
        assert!(!config.secure_cookies);
        assert_eq!(
            config.endpoint("rest/v1/projects"),
            "http://127.0.0.1:54321/rest/v1/projects"
        );
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(SupabaseConfig::new("nope", "anon").is_err());
        assert!(SupabaseConfig::new("https://abc.supabase.co", " ").is_err());
    }
}
