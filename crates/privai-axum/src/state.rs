//! Shared application state type.

use crate::bootstrap::AxumContext;
use std::sync::Arc;

/// Application state shared across all handlers and middleware.
///
/// Immutable after startup; holds the session gate, the completion and
/// account services and the shutdown token.
pub type AppState = Arc<AxumContext>;
