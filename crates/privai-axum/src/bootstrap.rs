//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the web adapter. All concrete implementations are instantiated here.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use privai_core::{
    AccountService, AuthProvider, CompletionBackend, CompletionService, GuardPolicy,
    ModelRegistry, ProfileRepository, ProjectRepository, SessionGate,
};
use privai_supabase::{SupabaseClient, SupabaseConfig};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::routes::{create_router, create_spa_router};
use crate::upstream::LlamaCompletionClient;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// Model identifier to inference server routing.
    pub models: ModelRegistry,
    /// Identity provider and store settings.
    pub supabase: SupabaseConfig,
    /// Paths the route guard evaluates.
    pub guard: GuardPolicy,
    /// Optional path to static assets for SPA serving.
    pub static_dir: Option<PathBuf>,
    /// CORS configuration.
    pub cors: CorsConfig,
}

/// Adapters the context is built from.
///
/// Production wiring uses [`bootstrap`]; tests pass stubs.
pub struct AppDeps {
    pub auth: Arc<dyn AuthProvider>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pub completions: Arc<dyn CompletionBackend>,
}

/// Everything the handlers need, shared behind [`crate::state::AppState`].
pub struct AxumContext {
    pub gate: SessionGate,
    pub auth: Arc<dyn AuthProvider>,
    pub completions: CompletionService,
    pub accounts: AccountService,
    /// Fires on server shutdown; in-flight completions stop relaying.
    pub shutdown: CancellationToken,
}

impl AxumContext {
    pub fn new(deps: AppDeps, models: ModelRegistry, guard: GuardPolicy) -> Self {
        Self {
            gate: SessionGate::new(Arc::clone(&deps.auth), guard),
            completions: CompletionService::new(Arc::new(models), deps.completions),
            accounts: AccountService::new(deps.profiles, deps.projects),
            auth: deps.auth,
            shutdown: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn with_shutdown(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }
}

/// Wire the Supabase adapter and the inference client into a context.
pub fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    let supabase = Arc::new(SupabaseClient::new(config.supabase.clone())?);
    let upstream = Arc::new(LlamaCompletionClient::new()?);

    info!(
        models = ?config.models.model_ids().collect::<Vec<_>>(),
        supabase = %config.supabase.url,
        "Bootstrapped privai context"
    );

    let deps = AppDeps {
        auth: supabase.clone(),
        profiles: supabase.clone(),
        projects: supabase,
        completions: upstream,
    };
    Ok(AxumContext::new(
        deps,
        config.models.clone(),
        config.guard.clone(),
    ))
}

/// Serve `app` on a pre-bound listener until `cancel` fires.
pub async fn serve(listener: TcpListener, app: Router, cancel: CancellationToken) -> Result<()> {
    let addr = listener.local_addr()?;
    info!("privai listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await?;

    info!("privai server shut down");
    Ok(())
}

/// Bootstrap, bind and run the server until Ctrl-C.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let shutdown = CancellationToken::new();
    let ctx = bootstrap(&config)?.with_shutdown(shutdown.clone());

    // Choose router based on whether static serving is configured
    let app = if let Some(ref static_dir) = config.static_dir {
        info!("Serving static assets from: {}", static_dir.display());
        create_spa_router(ctx, static_dir, &config.cors)
    } else {
        create_router(ctx, &config.cors)
    };

    let listener = TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], config.port))).await?;

    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            signal.cancel();
        }
    });

    serve(listener, app, shutdown).await
}
