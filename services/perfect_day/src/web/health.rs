//! services/perfect_day/src/web/health.rs

use axum::{extract::State, response::IntoResponse};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::web::response::{envelope, API_VERSION};
use crate::web::state::AppState;

#[derive(Serialize, ToSchema)]
pub struct HealthChecks {
    pub storage: String,
    pub google_places: String,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub version: String,
    /// Logged-in sessions that have not yet been evicted.
    pub active_sessions: usize,
    pub checks: HealthChecks,
}

#[derive(Serialize, ToSchema)]
pub struct VersionResponse {
    pub version: String,
    pub name: String,
}

/// Liveness plus a summary of the dependencies.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let storage = if tokio::fs::try_exists(&state.config.data_dir)
        .await
        .unwrap_or(false)
    {
        "ok"
    } else {
        "missing"
    };
    let google_places = if state.places.is_enabled() {
        "ok"
    } else {
        "disabled"
    };

    envelope(HealthResponse {
        status: "healthy".to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        version: API_VERSION.to_string(),
        active_sessions: state.sessions.active_sessions().await,
        checks: HealthChecks {
            storage: storage.to_string(),
            google_places: google_places.to_string(),
        },
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/version",
    responses((status = 200, description = "Build version", body = VersionResponse))
)]
pub async fn version_handler() -> impl IntoResponse {
    envelope(VersionResponse {
        version: API_VERSION.to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
    })
}
