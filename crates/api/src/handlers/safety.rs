//! Handlers for safety incidents.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use groundwork_core::audit::{AssistantAction, SafetyAction, TargetKind};
use groundwork_core::safety::validate_report;
use groundwork_core::types::DbId;
use groundwork_db::models::safety::{ReportIncident, UpdateIncidentStatus};
use groundwork_db::repositories::{ProjectRepo, SafetyRepo};
use serde::Serialize;

use crate::audit;
use crate::error::AppResult;
use crate::middleware::actor::Actor;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SafetyAnalysis {
    pub project_id: DbId,
    pub incidents: usize,
    pub analysis: String,
}

/// POST /api/v1/incidents
///
/// The report is validated before the assistant writes its summary; a
/// failed summary never blocks the report.
pub async fn report(
    State(state): State<AppState>,
    actor: Actor,
    Json(input): Json<ReportIncident>,
) -> AppResult<impl IntoResponse> {
    validate_report(&input.description, &input.location_on_site)?;
    ProjectRepo::require(&*state.db.read().await, input.project_id)?;

    let summary = state.assistant.summarize_incident(&input.description).await;

    let mut store = state.db.write().await;
    let incident = SafetyRepo::create(&mut store, &input, actor.user_id, summary)?;
    audit::record(
        &mut store,
        Some(incident.project_id),
        actor.user_id,
        SafetyAction::IncidentReported,
        audit::target(
            TargetKind::SafetyIncident,
            incident.id,
            format!("{} incident", incident.incident_type.label()),
        ),
    );

    tracing::info!(
        incident_id = incident.id,
        project_id = incident.project_id,
        severity = incident.severity.label(),
        serious = incident.severity.is_serious(),
        "Safety incident reported",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: incident })))
}

/// PUT /api/v1/incidents/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateIncidentStatus>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let incident = SafetyRepo::update_status(&mut store, id, input.status)?;
    audit::record(
        &mut store,
        Some(incident.project_id),
        actor.user_id,
        SafetyAction::IncidentStatusUpdated,
        audit::target(
            TargetKind::SafetyIncident,
            id,
            format!("Incident #{id} to {}", incident.status.label()),
        ),
    );

    tracing::info!(incident_id = id, status = incident.status.label(), actor_id = actor.user_id, "Incident status updated");
    Ok(Json(DataResponse { data: incident }))
}

/// GET /api/v1/projects/{project_id}/incidents
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let incidents = SafetyRepo::list_by_project(&*state.db.read().await, project_id);
    Ok(Json(DataResponse { data: incidents }))
}

/// POST /api/v1/projects/{project_id}/safety-analysis
///
/// Trend analysis over every incident of the project.
pub async fn analyze(
    State(state): State<AppState>,
    actor: Actor,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let incidents = {
        let store = state.db.read().await;
        ProjectRepo::require(&store, project_id)?;
        SafetyRepo::list_by_project(&store, project_id)
    };

    let analysis = state.assistant.safety_analysis(&incidents).await?;

    let mut store = state.db.write().await;
    audit::record(
        &mut store,
        Some(project_id),
        actor.user_id,
        AssistantAction::SafetyAnalysisGenerated,
        audit::target(TargetKind::Project, project_id, "for project".to_string()),
    );

    tracing::info!(project_id, incidents = incidents.len(), "Safety analysis generated");
    Ok(Json(DataResponse {
        data: SafetyAnalysis {
            project_id,
            incidents: incidents.len(),
            analysis,
        },
    }))
}
