//! Route guard decision logic.
//!
//! The guard only evaluates paths matched by its configured patterns. For
//! those, the outcome is a pure function of (session present, auth page):
//!
//! | Session present | Auth-only page | Decision           |
//! |-----------------|----------------|--------------------|
//! | no              | no             | `RedirectToSignIn` |
//! | no              | yes            | `Allow`            |
//! | yes             | no             | `Allow`            |
//! | yes             | yes            | `RedirectToHome`   |

use serde::{Deserialize, Serialize};

use crate::ports::ConfigError;

pub const SIGN_IN_PATH: &str = "/sign-in";
pub const SIGN_UP_PATH: &str = "/sign-up";
pub const HOME_PATH: &str = "/";
pub const ACCOUNT_PATH: &str = "/account";
pub const SIGN_OUT_PATH: &str = "/signout";

/// Outcome of the guard for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteDecision {
    Allow,
    RedirectToSignIn,
    RedirectToHome,
}

impl RouteDecision {
    /// Redirect target, or `None` for [`RouteDecision::Allow`].
    #[must_use]
    pub const fn redirect_target(self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::RedirectToSignIn => Some(SIGN_IN_PATH),
            Self::RedirectToHome => Some(HOME_PATH),
        }
    }
}

/// Apply the decision table.
#[must_use]
pub const fn decide(session_present: bool, auth_page: bool) -> RouteDecision {
    match (session_present, auth_page) {
        (false, false) => RouteDecision::RedirectToSignIn,
        (true, true) => RouteDecision::RedirectToHome,
        (false, true) | (true, false) => RouteDecision::Allow,
    }
}

/// Canonical form of a request path for guard matching.
///
/// Empty and `.` segments are dropped, so `//account`, `/account/` and
/// `/./account` all become `/account`. The root stays `/`.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();
    format!("/{}", segments.join("/"))
}

/// A path pattern: either an exact path or a `/prefix/*` subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    Exact(String),
    /// Matches the prefix itself and everything below it.
    Prefix(String),
}

impl PathPattern {
    /// Parse `"/account"` as exact and `"/account/*"` as a subtree.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        if !raw.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "path pattern must start with '/': {raw:?}"
            )));
        }
        if let Some(prefix) = raw.strip_suffix("/*") {
            return Ok(Self::Prefix(prefix.to_string()));
        }
        if raw.contains('*') {
            return Err(ConfigError::Invalid(format!(
                "only a trailing '/*' wildcard is supported: {raw:?}"
            )));
        }
        Ok(Self::Exact(raw.to_string()))
    }

    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(p) => p == path,
            Self::Prefix(p) => {
                path == p
                    || path
                        .strip_prefix(p.as_str())
                        .is_some_and(|rest| rest.starts_with('/') || p.is_empty())
            }
        }
    }
}

/// Which paths the guard evaluates, and which of those are auth-only pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardPolicy {
    guarded: Vec<PathPattern>,
    auth_pages: Vec<PathPattern>,
}

impl GuardPolicy {
    /// Build a policy. Every auth page must also be guarded, otherwise the
    /// "signed-in user visits sign-in" branch could never fire.
    pub fn new(
        guarded: Vec<PathPattern>,
        auth_pages: Vec<PathPattern>,
    ) -> Result<Self, ConfigError> {
        if guarded.is_empty() {
            return Err(ConfigError::Invalid("guard has no path patterns".into()));
        }
        for page in &auth_pages {
            let covered = guarded.iter().any(|g| match page {
                PathPattern::Exact(p) | PathPattern::Prefix(p) => g.matches(p),
            });
            if !covered {
                return Err(ConfigError::Invalid(format!(
                    "auth page {page:?} is not covered by any guarded pattern"
                )));
            }
        }
        Ok(Self {
            guarded,
            auth_pages,
        })
    }

    /// Parse string patterns, e.g. from configuration.
    pub fn from_patterns<S: AsRef<str>>(
        guarded: &[S],
        auth_pages: &[S],
    ) -> Result<Self, ConfigError> {
        let parse_all = |raw: &[S]| {
            raw.iter()
                .map(|s| PathPattern::parse(s.as_ref()))
                .collect::<Result<Vec<_>, _>>()
        };
        Self::new(parse_all(guarded)?, parse_all(auth_pages)?)
    }

    #[must_use]
    pub fn is_guarded(&self, path: &str) -> bool {
        self.guarded.iter().any(|p| p.matches(path))
    }

    #[must_use]
    pub fn is_auth_page(&self, path: &str) -> bool {
        self.auth_pages.iter().any(|p| p.matches(path))
    }

    /// Decide for a path. `None` means the path bypasses the guard.
    #[must_use]
    pub fn evaluate(&self, path: &str, session_present: bool) -> Option<RouteDecision> {
        self.is_guarded(path)
            .then(|| decide(session_present, self.is_auth_page(path)))
    }
}

impl Default for GuardPolicy {
    /// Home, account, sign-in, sign-up and sign-out pages, with sign-in and
    /// sign-up as the auth-only pages.
    fn default() -> Self {
        let exact = |p: &str| PathPattern::Exact(p.to_string());
        Self {
            guarded: vec![
                exact(HOME_PATH),
                exact(ACCOUNT_PATH),
                exact(SIGN_IN_PATH),
                exact(SIGN_UP_PATH),
                exact(SIGN_OUT_PATH),
            ],
            auth_pages: vec![exact(SIGN_IN_PATH), exact(SIGN_UP_PATH)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_table() {
        assert_eq!(decide(false, false), RouteDecision::RedirectToSignIn);
        assert_eq!(decide(false, true), RouteDecision::Allow);
        assert_eq!(decide(true, false), RouteDecision::Allow);
        assert_eq!(decide(true, true), RouteDecision::RedirectToHome);
    }

    #[test]
    fn test_allow_iff_session_xor_auth_page() {
        for session in [false, true] {
            for auth_page in [false, true] {
                let allowed = decide(session, auth_page) == RouteDecision::Allow;
                assert_eq!(allowed, session != auth_page);
            }
        }
    }

    #[test]
    fn test_redirect_targets() {
        assert_eq!(RouteDecision::Allow.redirect_target(), None);
        assert_eq!(
            RouteDecision::RedirectToSignIn.redirect_target(),
            Some("/sign-in")
        );
        assert_eq!(RouteDecision::RedirectToHome.redirect_target(), Some("/"));
    }

    #[test]
    fn test_default_policy() {
        let policy = GuardPolicy::default();

        assert_eq!(
            policy.evaluate("/account", false),
            Some(RouteDecision::RedirectToSignIn)
        );
        assert_eq!(policy.evaluate("/sign-in", false), Some(RouteDecision::Allow));
        assert_eq!(
            policy.evaluate("/sign-up", true),
            Some(RouteDecision::RedirectToHome)
        );
        assert_eq!(policy.evaluate("/", true), Some(RouteDecision::Allow));
        assert_eq!(policy.evaluate("/api/chat-private-ai", false), None);
        assert_eq!(policy.evaluate("/account/settings", false), None);
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("//"), "/");
        assert_eq!(normalize_path("/account/"), "/account");
        assert_eq!(normalize_path("//account"), "/account");
        assert_eq!(normalize_path("/./account//"), "/account");
        assert_eq!(normalize_path("/app//settings/"), "/app/settings");
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let policy = GuardPolicy::default();
        for path in ["/", "/account", "/sign-in", "/elsewhere"] {
            for session in [false, true] {
                assert_eq!(
                    policy.evaluate(path, session),
                    policy.evaluate(path, session)
                );
            }
        }
    }

    #[test]
    fn test_prefix_pattern() {
        let pattern = PathPattern::parse("/account/*").unwrap();
        assert!(pattern.matches("/account"));
        assert!(pattern.matches("/account/billing"));
        assert!(!pattern.matches("/accounts"));

        let root = PathPattern::parse("/*").unwrap();
        assert!(root.matches("/anything/at/all"));
    }

    #[test]
    fn test_pattern_parse_errors() {
        assert!(PathPattern::parse("account").is_err());
        assert!(PathPattern::parse("/a*b").is_err());
        assert_eq!(
            PathPattern::parse(" /x ").unwrap(),
            PathPattern::Exact("/x".into())
        );
    }

    #[test]
    fn test_policy_rejects_unguarded_auth_page() {
        let err = GuardPolicy::from_patterns(&["/"], &["/sign-in"]);
        assert!(err.is_err());

        let ok = GuardPolicy::from_patterns(&["/", "/sign-in"], &["/sign-in"]);
        assert!(ok.is_ok());

        assert!(GuardPolicy::from_patterns::<&str>(&[], &[]).is_err());
    }
}
