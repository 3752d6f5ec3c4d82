//! Handlers for the equipment fleet and the resource schedule.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use groundwork_core::audit::{ResourceAction, TargetKind};
use groundwork_core::types::DbId;
use groundwork_db::models::equipment::{
    AssignEquipment, CreateResourceAssignment, UpdateEquipmentStatus,
};
use groundwork_db::repositories::{EquipmentRepo, ResourceRepo};

use crate::audit;
use crate::error::AppResult;
use crate::middleware::actor::Actor;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Equipment
// ---------------------------------------------------------------------------

/// GET /api/v1/companies/{company_id}/equipment
pub async fn list_by_company(
    State(state): State<AppState>,
    Path(company_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let items = EquipmentRepo::list_by_company(&*state.db.read().await, company_id);
    Ok(Json(DataResponse { data: items }))
}

/// PUT /api/v1/equipment/{id}/assignment
pub async fn assign(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
    Json(input): Json<AssignEquipment>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let item = EquipmentRepo::assign(&mut store, id, input.project_id)?;
    audit::record(
        &mut store,
        Some(input.project_id),
        actor.user_id,
        ResourceAction::EquipmentAssigned,
        audit::target(TargetKind::Equipment, item.id, item.name.clone()),
    );

    tracing::info!(equipment_id = id, project_id = input.project_id, actor_id = actor.user_id, "Equipment assigned");
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/equipment/{id}/assignment
pub async fn unassign(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let (item, project_id) = EquipmentRepo::unassign(&mut store, id)?;
    audit::record(
        &mut store,
        Some(project_id),
        actor.user_id,
        ResourceAction::EquipmentUnassigned,
        audit::target(TargetKind::Equipment, item.id, item.name.clone()),
    );

    tracing::info!(equipment_id = id, project_id, actor_id = actor.user_id, "Equipment unassigned");
    Ok(Json(DataResponse { data: item }))
}

/// PUT /api/v1/equipment/{id}/status
///
/// Audited against the item's project; unassigned items have none.
pub async fn update_status(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEquipmentStatus>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let item = EquipmentRepo::update_status(&mut store, id, input.status)?;
    audit::record(
        &mut store,
        item.project_id,
        actor.user_id,
        ResourceAction::EquipmentStatusUpdated,
        audit::target(
            TargetKind::Equipment,
            item.id,
            format!("{} to {}", item.name, item.status.label()),
        ),
    );

    tracing::info!(equipment_id = id, status = item.status.label(), "Equipment status updated");
    Ok(Json(DataResponse { data: item }))
}

// ---------------------------------------------------------------------------
// Resource schedule
// ---------------------------------------------------------------------------

/// GET /api/v1/companies/{company_id}/resource-assignments
pub async fn list_assignments(
    State(state): State<AppState>,
    Path(company_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let assignments = ResourceRepo::list_by_company(&*state.db.read().await, company_id);
    Ok(Json(DataResponse { data: assignments }))
}

/// POST /api/v1/resource-assignments
pub async fn create_assignment(
    State(state): State<AppState>,
    actor: Actor,
    Json(input): Json<CreateResourceAssignment>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let assignment = ResourceRepo::create(&mut store, &input)?;
    audit::record(
        &mut store,
        Some(assignment.project_id),
        actor.user_id,
        ResourceAction::ResourceScheduled,
        audit::target(
            TargetKind::ResourceAssignment,
            assignment.id,
            format!(
                "{} #{}",
                assignment.resource_type.as_str(),
                assignment.resource_id
            ),
        ),
    );

    tracing::info!(
        assignment_id = assignment.id,
        project_id = assignment.project_id,
        resource_type = assignment.resource_type.as_str(),
        resource_id = assignment.resource_id,
        "Resource scheduled",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: assignment })))
}

/// DELETE /api/v1/resource-assignments/{id}
pub async fn delete_assignment(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let removed = ResourceRepo::delete(&mut store, id)?;
    audit::record(
        &mut store,
        Some(removed.project_id),
        actor.user_id,
        ResourceAction::ResourceScheduled,
        audit::target(
            TargetKind::ResourceAssignment,
            id,
            format!("Assignment #{id} removed"),
        ),
    );

    tracing::info!(assignment_id = id, actor_id = actor.user_id, "Resource assignment removed");
    Ok(StatusCode::NO_CONTENT)
}
