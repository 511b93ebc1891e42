//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (HTTP framework, identity provider, store).
//!
//! # Structure
//!
//! - `chat` - Completion request types and prompt construction
//! - `sampling` - Upstream sampling parameters and request body
//! - `session` - Sessions, credentials and cookie updates
//! - `route` - Route guard policy and decision table
//! - `model` - Model identifier to upstream endpoint registry
//! - `account` - Sign-in form and user profile
//! - `project` - Inference projects

pub mod account;
pub mod chat;
pub mod model;
pub mod project;
pub mod route;
pub mod sampling;
pub mod session;

// Re-export domain types at the domain level for convenience
pub use account::{Profile, ProfileUpdate, SignInForm};
pub use chat::{ASSISTANT_CUE, ChatMessage, CompletionRequest, MessageRole, ModelRef, build_prompt};
pub use model::{ModelRegistry, PRIVATE_AI_MODEL_ID, UpstreamEndpoint};
pub use project::{NewProject, Project, ProjectRename, normalize_project_name};
pub use route::{GuardPolicy, PathPattern, RouteDecision, decide, normalize_path};
pub use sampling::{CompletionBody, SamplingParams};
pub use session::{CookieUpdate, Credentials, Session, SessionLookup};
