//! Daemon entry point for the talent directory service.
//!
//! Loads configuration from arguments and the environment, opens the
//! database, and serves the HTTP API.

mod config;
mod database;

use talent_core::auth::TokenAuthority;
use talent_core::control::TalentControlPlane;
use talent_http::{AppState, HttpServerConfig, TalentServer};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::TalentConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = TalentConfig::from_args()?;
    tracing::debug!(?config, "configuration loaded");

    let db = database::connect(&config).await?;
    let state = AppState::new(
        TalentControlPlane::new(db),
        TokenAuthority::new(config.token_secret.as_bytes(), config.token_ttl),
        config.request_timeout,
    );
    let server_config =
        HttpServerConfig::new(config.http_addr).with_max_body_bytes(config.max_body_bytes);

    TalentServer::new(state, server_config).serve().await
}
