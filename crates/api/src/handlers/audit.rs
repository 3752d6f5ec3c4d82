//! Handlers for the audit log.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use groundwork_core::types::DbId;
use groundwork_db::models::audit::{AuditLogView, RecentActivityQuery};
use groundwork_db::repositories::audit_repo::DEFAULT_RECENT_LIMIT;
use groundwork_db::repositories::AuditRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{project_id}/audit-logs
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let entries: Vec<AuditLogView> = AuditRepo::list_by_project(&*state.db.read().await, project_id)
        .iter()
        .map(|e| e.view())
        .collect();
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/companies/{company_id}/activity?limit=10
pub async fn recent_for_company(
    State(state): State<AppState>,
    Path(company_id): Path<DbId>,
    Query(params): Query<RecentActivityQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let entries: Vec<AuditLogView> =
        AuditRepo::recent_for_company(&*state.db.read().await, company_id, limit)
            .iter()
            .map(|e| e.view())
            .collect();
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/audit-logs/verify
///
/// Recomputes the whole hash chain.
pub async fn verify_chain(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let result = AuditRepo::verify_chain(&*state.db.read().await);
    if !result.chain_valid {
        tracing::warn!(first_break = ?result.first_break, "Audit chain verification failed");
    }
    Ok(Json(DataResponse { data: result }))
}
