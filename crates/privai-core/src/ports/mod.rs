//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No HTTP framework or client types in any signature
//! - Identity provider and store are reached only through these traits
//! - The completion backend returns raw bytes; framing belongs to the upstream

pub mod auth_provider;
pub mod completion_backend;
pub mod profile_repository;
pub mod project_repository;

use thiserror::Error;

pub use auth_provider::{AuthError, AuthProvider};
pub use completion_backend::{CompletionBackend, CompletionError, CompletionStream};
pub use profile_repository::ProfileRepository;
pub use project_repository::ProjectRepository;

#[cfg(test)]
pub use auth_provider::MockAuthProvider;
#[cfg(test)]
pub use completion_backend::MockCompletionBackend;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
#[cfg(test)]
pub use project_repository::MockProjectRepository;

/// Errors from the remote tabular store.
///
/// Abstracts away the store's wire details and provides a clean interface
/// for services to handle storage failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested row was not found (or is not visible to the user).
    #[error("Not found: {0}")]
    NotFound(String),

    /// The store no longer accepts the session's token (expired or revoked).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The store rejected the data (constraint, row-level policy).
    #[error("Rejected: {0}")]
    Rejected(String),

    /// The store could not be reached or failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The store's response could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Startup configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required setting is absent.
    #[error("Missing configuration: {0}")]
    Missing(String),

    /// A setting is present but invalid.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (HTTP status codes, exit codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Identity provider operation failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Completion proxy failed.
    #[error(transparent)]
    Completion(#[from] CompletionError),

    /// Configuration error.
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// Validation error (invalid input).
    #[error("Validation error: {0}")]
    Validation(String),
}
