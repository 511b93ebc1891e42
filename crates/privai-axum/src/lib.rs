#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Dev-dependencies used only by the integration tests
#[cfg(test)]
use chrono as _;
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tower as _;

// Used by the main.rs binary
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod cli;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod relay;
pub mod routes;
pub mod state;
pub mod upstream;

pub use bootstrap::{
    AppDeps, AxumContext, CorsConfig, ServerConfig, bootstrap, serve, start_server,
};
pub use cli::Cli;
pub use error::HttpError;
pub use routes::{create_router, create_spa_router};
pub use state::AppState;
pub use upstream::LlamaCompletionClient;
