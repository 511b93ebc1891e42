//! Supabase adapter for privai.
//!
//! [`SupabaseClient`] implements the identity provider port against the
//! Supabase auth API and the project/profile repositories against its
//! PostgREST endpoint. Sessions live in two cookies (access and refresh
//! token); expired access tokens are refreshed during the lookup and the
//! new cookies are handed back to the caller.
#![deny(unused_crate_dependencies)]

// Dev-dependencies used only by the integration tests
#[cfg(test)]
use axum as _;
#[cfg(test)]
use tokio as _;

mod auth;
mod client;
pub mod config;
pub mod error;
mod store;

pub use client::SupabaseClient;
pub use config::{
    DEFAULT_ACCESS_COOKIE, DEFAULT_REFRESH_COOKIE, DEFAULT_REFRESH_MAX_AGE_SECS, SupabaseConfig,
};
pub use error::SupabaseError;
