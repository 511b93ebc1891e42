//! Command-line and environment configuration.
//!
//! Every flag can also be set through the environment (`.env` is loaded by
//! the binary before parsing).

use std::path::PathBuf;

use clap::Parser;
use privai_core::{ConfigError, GuardPolicy, ModelRegistry, PRIVATE_AI_MODEL_ID};
use privai_supabase::SupabaseConfig;

use crate::bootstrap::{CorsConfig, ServerConfig};

/// privai web server: route guard and completion proxy.
#[derive(Debug, Parser)]
#[command(name = "privai")]
#[command(about = "Serve the privai chat app behind a session guard")]
#[command(version)]
pub struct Cli {
    /// Port to listen on
    #[arg(long, env = "PRIVAI_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Base URL of the self-hosted inference server (model `privateAI`)
    #[arg(long, env = "PRIVATE_AI_URL")]
    pub private_ai_url: String,

    /// Extra models as `id=url` entries separated by `;`
    #[arg(long, env = "PRIVAI_MODELS", default_value = "")]
    pub models: String,

    /// Supabase project URL
    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: String,

    /// Supabase anon (public) key
    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    pub supabase_anon_key: String,

    /// Directory with the built front end, served behind the guard
    #[arg(long, env = "PRIVAI_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Allowed CORS origins, comma separated (default: any)
    #[arg(long, env = "PRIVAI_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    /// Paths evaluated by the guard, comma separated; `/prefix/*` matches a subtree
    #[arg(long, env = "PRIVAI_GUARDED_PATHS", value_delimiter = ',')]
    pub guarded_paths: Vec<String>,

    /// Guarded paths only meant for signed-out users, comma separated
    #[arg(long, env = "PRIVAI_AUTH_PAGES", value_delimiter = ',')]
    pub auth_pages: Vec<String>,
}

impl Cli {
    /// Validate everything and build the server configuration.
    pub fn into_config(self) -> Result<ServerConfig, ConfigError> {
        let mut entries = vec![(PRIVATE_AI_MODEL_ID.to_string(), self.private_ai_url)];
        entries.extend(ModelRegistry::parse_list(&self.models)?);
        let models = ModelRegistry::from_entries(entries)?;

        let supabase = SupabaseConfig::new(&self.supabase_url, self.supabase_anon_key)?;

        let guard = if self.guarded_paths.is_empty() && self.auth_pages.is_empty() {
            GuardPolicy::default()
        } else {
            GuardPolicy::from_patterns(&self.guarded_paths, &self.auth_pages)?
        };

        let origins: Vec<String> = self
            .cors_origins
            .into_iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
        let cors = if origins.is_empty() {
            CorsConfig::AllowAll
        } else {
            CorsConfig::AllowOrigins(origins)
        };

        Ok(ServerConfig {
            port: self.port,
            models,
            supabase,
            guard,
            static_dir: self.static_dir,
            cors,
        })
    }
}
