use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` while serving from the Mock Store.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database answers queries.
    pub db_healthy: bool,
    /// `database` or `mock`.
    pub data_source: &'static str,
}

/// GET /health -- service and database health.
///
/// Mock-only deployments report `ok`: the Mock Store is their system of
/// record.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = state.data.primary_healthy().await;
    let has_database = state.data.pool().is_some();

    let (status, data_source) = match (has_database, db_healthy) {
        (true, true) => ("ok", "database"),
        (true, false) => ("degraded", "mock"),
        (false, _) => ("ok", "mock"),
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        data_source,
    })
}

/// Mount health check routes (root level, not under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
