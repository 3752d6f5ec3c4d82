use axum::extract::State;
use axum::{routing::get, Json, Router};
use groundwork_db::repositories::AuditRepo;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub projects: usize,
    pub audit_entries: usize,
    /// Whether the audit hash chain still verifies.
    pub audit_chain_valid: bool,
}

/// GET /health -- returns service and store health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.db.read().await;
    let chain = AuditRepo::verify_chain(&store);

    let status = if chain.chain_valid { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        projects: store.projects.len(),
        audit_entries: store.audit_logs.len(),
        audit_chain_valid: chain.chain_valid,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
