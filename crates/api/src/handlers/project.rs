//! Handlers for projects, team assignments and project-level assessments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use futures::future::join_all;
use groundwork_assist::assistant::CostEstimateItem;
use groundwork_core::audit::{AssistantAction, ProjectAction, TargetKind};
use groundwork_core::health::{HealthReport, ProjectMetrics};
use groundwork_core::types::DbId;
use groundwork_db::models::project::{CreateProject, Project, ProjectAssignment, UpdateProject};
use groundwork_db::repositories::{AssignmentRepo, HealthRepo, ProjectRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::actor::Actor;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ProjectHealth {
    pub project_id: DbId,
    pub project_name: String,
    pub metrics: ProjectMetrics,
    pub report: HealthReport,
}

#[derive(Debug, Deserialize)]
pub struct CostEstimateRequest {
    pub scope: String,
}

#[derive(Debug, Serialize)]
pub struct CostEstimate {
    pub project_id: DbId,
    pub items: Vec<CostEstimateItem>,
    pub total_cost: f64,
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    actor: Actor,
    Json(input): Json<CreateProject>,
) -> AppResult<impl IntoResponse> {
    let project = ProjectRepo::create(&mut *state.db.write().await, &input)?;
    tracing::info!(
        project_id = project.id,
        site_id = project.site_id,
        actor_id = actor.user_id,
        "Project created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = ProjectRepo::require(&*state.db.read().await, id)?;
    Ok(Json(DataResponse { data: project }))
}

/// PUT /api/v1/projects/{id}
///
/// A manager change is audited only when the manager actually differs.
pub async fn update(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let Some(manager_id) = input.manager_id else {
        return Ok(Json(DataResponse {
            data: ProjectRepo::require(&store, id)?,
        }));
    };

    let (project, change) = ProjectRepo::update_manager(&mut store, id, manager_id)?;
    if let Some(description) = change {
        audit::record(
            &mut store,
            Some(id),
            actor.user_id,
            ProjectAction::ManagerChanged,
            audit::target(TargetKind::User, manager_id, description),
        );
        tracing::info!(project_id = id, manager_id, actor_id = actor.user_id, "Project manager changed");
    }
    Ok(Json(DataResponse { data: project }))
}

/// GET /api/v1/companies/{company_id}/projects
pub async fn list_by_company(
    State(state): State<AppState>,
    Path(company_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let projects = ProjectRepo::list_by_company(&*state.db.read().await, company_id);
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/users/{user_id}/managed-projects
pub async fn list_by_manager(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let projects = ProjectRepo::list_by_manager(&*state.db.read().await, user_id);
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/users/{user_id}/projects
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let projects = ProjectRepo::list_by_user(&*state.db.read().await, user_id);
    Ok(Json(DataResponse { data: projects }))
}

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

/// PUT /api/v1/projects/{id}/members/{user_id}
///
/// Idempotent; only a new assignment is audited.
pub async fn assign_user(
    State(state): State<AppState>,
    actor: Actor,
    Path((id, user_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let (user, created) = AssignmentRepo::assign(&mut store, user_id, id)?;
    if created {
        audit::record(
            &mut store,
            Some(id),
            actor.user_id,
            ProjectAction::UserAssigned,
            audit::target(TargetKind::User, user.id, user.name),
        );
        tracing::info!(project_id = id, user_id, actor_id = actor.user_id, "User assigned to project");
    }
    Ok(Json(DataResponse {
        data: ProjectAssignment {
            user_id,
            project_id: id,
        },
    }))
}

/// DELETE /api/v1/projects/{id}/members/{user_id}
pub async fn unassign_user(
    State(state): State<AppState>,
    actor: Actor,
    Path((id, user_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let (user, removed) = AssignmentRepo::unassign(&mut store, user_id, id)?;
    if removed {
        audit::record(
            &mut store,
            Some(id),
            actor.user_id,
            ProjectAction::UserUnassigned,
            audit::target(TargetKind::User, user.id, user.name),
        );
        tracing::info!(project_id = id, user_id, actor_id = actor.user_id, "User unassigned from project");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/projects/{id}/unassigned-users
///
/// Field staff of the project's company who are not on the project yet.
pub async fn list_unassigned(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let store = state.db.read().await;
    let project = ProjectRepo::require(&store, id)?;
    let users = UserRepo::list_unassigned(&store, id, project.company_id);
    Ok(Json(DataResponse { data: users }))
}

// ---------------------------------------------------------------------------
// Assessments
// ---------------------------------------------------------------------------

async fn assess(state: &AppState, project: Project, metrics: ProjectMetrics) -> ProjectHealth {
    let report = state
        .assistant
        .health_report(&project.name, project.created_at, &metrics)
        .await;
    ProjectHealth {
        project_id: project.id,
        project_name: project.name,
        metrics,
        report,
    }
}

/// GET /api/v1/projects/{id}/health-report
///
/// Falls back to a neutral report when the assistant is unavailable.
pub async fn health_report(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let (project, metrics) =
        HealthRepo::project_metrics(&*state.db.read().await, id, Utc::now())?;
    let health = assess(&state, project, metrics).await;
    tracing::info!(project_id = id, score = health.report.score, "Project health assessed");
    Ok(Json(DataResponse { data: health }))
}

/// GET /api/v1/companies/{company_id}/health-reports
pub async fn company_health_reports(
    State(state): State<AppState>,
    Path(company_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let snapshots = {
        let store = state.db.read().await;
        let now = Utc::now();
        ProjectRepo::list_by_company(&store, company_id)
            .into_iter()
            .map(|p| HealthRepo::project_metrics(&store, p.id, now))
            .collect::<Result<Vec<_>, _>>()?
    };

    let reports = join_all(
        snapshots
            .into_iter()
            .map(|(project, metrics)| assess(&state, project, metrics)),
    )
    .await;

    tracing::info!(company_id, projects = reports.len(), "Company health assessed");
    Ok(Json(DataResponse { data: reports }))
}

/// POST /api/v1/projects/{id}/cost-estimate
pub async fn estimate_costs(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
    Json(input): Json<CostEstimateRequest>,
) -> AppResult<impl IntoResponse> {
    if input.scope.trim().is_empty() {
        return Err(AppError::BadRequest("Scope of work must not be empty".into()));
    }
    let project = ProjectRepo::require(&*state.db.read().await, id)?;

    let items = state
        .assistant
        .estimate_costs(&project.name, input.scope.trim())
        .await?;

    let mut store = state.db.write().await;
    audit::record(
        &mut store,
        Some(id),
        actor.user_id,
        AssistantAction::CostEstimateGenerated,
        audit::target(TargetKind::Project, id, format!("for project \"{}\"", project.name)),
    );

    let total_cost: f64 = items.iter().map(|i| i.total_cost).sum();
    tracing::info!(project_id = id, items = items.len(), total_cost, "Cost estimate generated");
    Ok(Json(DataResponse {
        data: CostEstimate {
            project_id: id,
            items,
            total_cost,
        },
    }))
}
