//! Core domain types, ports and services for privai.
//!
//! privai gates a chat web application behind an external identity provider
//! and proxies chat completions to a self-hosted inference server. This crate
//! holds everything that does not depend on a particular HTTP framework,
//! identity provider or store:
//!
//! - [`domain`]: requests, sessions, the guard decision table, prompt building
//! - [`ports`]: traits for the identity provider, store and completion backend
//! - [`services`]: orchestration shared by every adapter
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod services;
pub mod utils;

// Re-export commonly used types for convenience
pub use domain::{
    ChatMessage, CompletionBody, CompletionRequest, CookieUpdate, Credentials, GuardPolicy,
    MessageRole, ModelRef, ModelRegistry, NewProject, PRIVATE_AI_MODEL_ID, PathPattern, Profile,
    ProfileUpdate, Project, ProjectRename, RouteDecision, SamplingParams, Session, SessionLookup,
    SignInForm, UpstreamEndpoint, build_prompt, decide, normalize_path,
};
pub use ports::{
    AuthError, AuthProvider, CompletionBackend, CompletionError, CompletionStream, ConfigError,
    CoreError, ProfileRepository, ProjectRepository, StoreError,
};
pub use services::{AccountService, CompletionService, GateOutcome, SessionGate};
