//! Session gate: the framework-independent half of the route guard.
//!
//! Resolves the session through the identity provider and applies the
//! [`GuardPolicy`]. The HTTP adapter only translates the outcome into a
//! pass-through or a redirect.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{
    CookieUpdate, Credentials, GuardPolicy, RouteDecision, SessionLookup, decide, normalize_path,
};
use crate::ports::AuthProvider;

/// What the guard should do with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// The path is outside the guarded set; no lookup was performed.
    Bypass,
    /// The path is guarded and a decision was made.
    Decided {
        decision: RouteDecision,
        /// Cookies refreshed during the lookup, to attach to the response.
        refreshed: Vec<CookieUpdate>,
    },
}

/// Resolves sessions and applies the guard policy.
pub struct SessionGate {
    auth: Arc<dyn AuthProvider>,
    policy: GuardPolicy,
}

impl SessionGate {
    pub fn new(auth: Arc<dyn AuthProvider>, policy: GuardPolicy) -> Self {
        Self { auth, policy }
    }

    /// Look up the current user. Provider failures count as "no session".
    pub async fn lookup(&self, credentials: &Credentials) -> SessionLookup {
        if credentials.is_empty() {
            return SessionLookup::anonymous();
        }
        match self.auth.current_user(credentials).await {
            Ok(lookup) => lookup,
            Err(e) => {
                warn!(error = %e, "Session lookup failed, treating request as anonymous");
                SessionLookup::anonymous()
            }
        }
    }

    /// Evaluate a request path. The path is normalised first, so trailing or
    /// doubled slashes cannot step around a guarded pattern.
    pub async fn check(&self, path: &str, credentials: &Credentials) -> GateOutcome {
        let path = normalize_path(path);
        let path = path.as_str();
        if !self.policy.is_guarded(path) {
            return GateOutcome::Bypass;
        }

        let lookup = self.lookup(credentials).await;
        let decision = decide(lookup.is_authenticated(), self.policy.is_auth_page(path));

        debug!(
            path = %path,
            authenticated = lookup.is_authenticated(),
            decision = ?decision,
            "Route guard decision"
        );

        GateOutcome::Decided {
            decision,
            refreshed: lookup.refreshed,
        }
    }
}
