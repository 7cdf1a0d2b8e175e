//! Server construction and middleware wiring.

mod config;
mod settings;
mod state_builders;

pub use config::ServerConfig;
pub use settings::AppSettings;

use state_builders::build_http_state;

use std::future::Future;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use registry::Trace;
#[cfg(debug_assertions)]
use registry::doc::ApiDoc;
use registry::inbound::http::configure;
use registry::inbound::http::health::HealthState;
use registry::inbound::http::state::HttpState;
use registry::outbound::persistence::DbPool;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server over an initialised pool.
///
/// Marks `health_state` ready once the listener is bound. Actix's own signal
/// handling is disabled; pair the server with [`spawn_graceful_shutdown`].
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    pool: &DbPool,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(pool, config.hash_cost));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .disable_signals()
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Stop `server` gracefully on SIGINT or SIGTERM, failing both health probes
/// first so no new traffic is routed while requests drain.
pub fn spawn_graceful_shutdown(health_state: web::Data<HealthState>, server: ServerHandle) {
    actix_web::rt::spawn(drain_after(shutdown_signal(), health_state, move || async move {
        server.stop(true).await;
    }));
}

async fn drain_after<S, F, Fut>(signal: S, health_state: web::Data<HealthState>, stop: F)
where
    S: Future<Output = std::io::Result<()>>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = ()>,
{
    if let Err(error) = signal.await {
        warn!(%error, "cannot listen for shutdown signals");
        return;
    }
    info!("shutdown signal received, draining");
    health_state.mark_unhealthy();
    stop().await;
}

#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
