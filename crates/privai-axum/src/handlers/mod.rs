//! HTTP request handlers for the Axum web server.
//!
//! Each submodule contains handlers for a specific API area.
//! Handlers are thin wrappers that delegate to the core services.

pub mod auth;
pub mod completion;
pub mod profile;
pub mod projects;
