//! Registry entry-point: loads settings, prepares the store, and serves the
//! REST API with OpenAPI docs in debug builds.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use registry::inbound::http::health::HealthState;
use registry::outbound::persistence::{DbPool, apply_migrations};
use server::{AppSettings, ServerConfig, create_server, spawn_graceful_shutdown};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let config = ServerConfig::from_settings(&settings).map_err(std::io::Error::other)?;

    let applied = apply_migrations(config.pool.database_url().to_owned())
        .await
        .map_err(std::io::Error::other)?;
    info!(applied, "database schema up to date");

    let pool = DbPool::new(config.pool.clone())
        .await
        .map_err(|e| std::io::Error::other(e.into_message()))?;

    let health_state = web::Data::new(HealthState::new());
    let bind_addr = config.bind_addr();
    let server = create_server(health_state.clone(), &pool, config)?;
    spawn_graceful_shutdown(health_state, server.handle());
    info!(%bind_addr, "registry listening");
    server.await
}
