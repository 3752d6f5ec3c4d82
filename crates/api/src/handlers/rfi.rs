//! Handlers for requests for information.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use groundwork_core::audit::{RfiAction, TargetKind};
use groundwork_core::types::DbId;
use groundwork_db::models::rfi::{CreateRfi, Rfi, UpdateRfi};
use groundwork_db::repositories::{ProjectRepo, RfiRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::actor::Actor;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SuggestAssigneeRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AssigneeSuggestion {
    pub assignee_id: Option<DbId>,
}

fn describe(rfi: &Rfi, action: RfiAction) -> String {
    match action {
        RfiAction::AssigneeChanged => format!("on \"{}\"", rfi.subject),
        RfiAction::Created | RfiAction::Answered => rfi.subject.clone(),
    }
}

/// POST /api/v1/rfis
pub async fn create(
    State(state): State<AppState>,
    actor: Actor,
    Json(input): Json<CreateRfi>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let rfi = RfiRepo::create(&mut store, &input, actor.user_id)?;
    audit::record(
        &mut store,
        Some(rfi.project_id),
        actor.user_id,
        RfiAction::Created,
        audit::target(TargetKind::Rfi, rfi.id, describe(&rfi, RfiAction::Created)),
    );

    tracing::info!(rfi_id = rfi.id, project_id = rfi.project_id, actor_id = actor.user_id, "RFI created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: rfi })))
}

/// GET /api/v1/rfis/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let rfi = RfiRepo::require(&*state.db.read().await, id)?;
    Ok(Json(DataResponse { data: rfi }))
}

/// PUT /api/v1/rfis/{id}
pub async fn update(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRfi>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let (rfi, actions) = RfiRepo::update(&mut store, id, &input)?;
    for action in actions {
        audit::record(
            &mut store,
            Some(rfi.project_id),
            actor.user_id,
            action,
            audit::target(TargetKind::Rfi, rfi.id, describe(&rfi, action)),
        );
    }

    tracing::info!(rfi_id = id, status = ?rfi.status, actor_id = actor.user_id, "RFI updated");
    Ok(Json(DataResponse { data: rfi }))
}

/// GET /api/v1/projects/{project_id}/rfis
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let rfis = RfiRepo::list_by_project(&*state.db.read().await, project_id);
    Ok(Json(DataResponse { data: rfis }))
}

/// POST /api/v1/projects/{project_id}/rfis/suggest-assignee
///
/// `assignee_id` is null when no project member is a confident match.
pub async fn suggest_assignee(
    State(state): State<AppState>,
    actor: Actor,
    Path(project_id): Path<DbId>,
    Json(input): Json<SuggestAssigneeRequest>,
) -> AppResult<impl IntoResponse> {
    let question = input.question.trim();
    if question.is_empty() {
        return Err(AppError::BadRequest("Question must not be empty".into()));
    }
    let team = {
        let store = state.db.read().await;
        ProjectRepo::require(&store, project_id)?;
        UserRepo::list_by_project(&store, project_id)
    };

    let assignee_id = state.assistant.suggest_rfi_assignee(question, &team).await;
    tracing::info!(
        project_id,
        team = team.len(),
        suggested = ?assignee_id,
        actor_id = actor.user_id,
        "RFI assignee suggested",
    );
    Ok(Json(DataResponse {
        data: AssigneeSuggestion { assignee_id },
    }))
}
