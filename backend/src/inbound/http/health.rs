//! Health endpoints.
//!
//! `GET /health` reports store connectivity and always answers 200 so callers
//! can read the body. `/health/ready` and `/health/live` are orchestration
//! probes driven by [`HealthState`].

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::HealthReport;
use crate::inbound::http::responses::MessageResponse;
use crate::inbound::http::state::HttpState;

/// Readiness and liveness flags shared with the server lifecycle.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Start not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once migrations have run and the pool is wired.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail both probes once shutdown starts, so orchestrators stop routing
    /// traffic while in-flight requests drain.
    pub fn mark_unhealthy(&self) {
        self.ready.store(false, Ordering::Release);
        self.live.store(false, Ordering::Release);
    }

    /// Whether `/health/ready` answers 200.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Whether `/health/live` answers 200.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `UP` or `DOWN`.
    #[schema(example = "UP")]
    pub status: String,
    /// Probed store.
    #[schema(example = "PostgreSQL")]
    pub database: String,
    /// Success text, present when `UP`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Database connection successful")]
    pub message: Option<String>,
    /// Failure text, present when `DOWN`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&HealthReport> for HealthResponse {
    fn from(report: &HealthReport) -> Self {
        Self {
            status: report.status().as_str().to_owned(),
            database: report.database().to_owned(),
            message: report.message().map(str::to_owned),
            error: report.error().map(str::to_owned),
        }
    }
}

/// Service banner.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service banner", body = MessageResponse)),
    tags = ["health"],
    operation_id = "root"
)]
#[get("/")]
pub async fn root() -> web::Json<MessageResponse> {
    web::Json(MessageResponse::new("Account and item registry API"))
}

/// Store connectivity report. Store failures produce `DOWN`, never an error.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Store health report", body = HealthResponse)),
    tags = ["health"],
    operation_id = "checkHealth"
)]
#[get("/health")]
pub async fn check_health(state: web::Data<HttpState>) -> web::Json<HealthResponse> {
    let report = state.store_health.check().await;
    web::Json(HealthResponse::from(&report))
}

/// Readiness probe: 200 once the server is wired, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    ),
    tags = ["health"],
    operation_id = "ready"
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe: 200 while alive, 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    ),
    tags = ["health"],
    operation_id = "live"
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}
