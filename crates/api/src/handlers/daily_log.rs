//! Handlers for daily site logs.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use groundwork_core::audit::{ProjectAction, TargetKind};
use groundwork_core::types::DbId;
use groundwork_db::models::daily_log::CreateDailyLog;
use groundwork_db::repositories::{DailyLogRepo, ProjectRepo};
use serde::Serialize;

use crate::audit;
use crate::error::AppResult;
use crate::middleware::actor::Actor;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LogSummary {
    pub project_id: DbId,
    pub logs: usize,
    pub summary: String,
}

/// POST /api/v1/daily-logs
pub async fn create(
    State(state): State<AppState>,
    actor: Actor,
    Json(input): Json<CreateDailyLog>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let log = DailyLogRepo::create(&mut store, &input, actor.user_id)?;
    audit::record(
        &mut store,
        Some(log.project_id),
        actor.user_id,
        ProjectAction::DailyLogAdded,
        audit::target(
            TargetKind::DailyLog,
            log.id,
            format!("Log for {}", log.date.format("%Y-%m-%d")),
        ),
    );

    tracing::info!(log_id = log.id, project_id = log.project_id, weather = log.weather.label(), "Daily log added");
    Ok((StatusCode::CREATED, Json(DataResponse { data: log })))
}

/// GET /api/v1/projects/{project_id}/daily-logs
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let logs = DailyLogRepo::list_by_project(&*state.db.read().await, project_id);
    Ok(Json(DataResponse { data: logs }))
}

/// GET /api/v1/projects/{project_id}/daily-logs/summary
///
/// Always succeeds; a failed summary is reported in the text itself.
pub async fn summarize(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let logs = {
        let store = state.db.read().await;
        ProjectRepo::require(&store, project_id)?;
        DailyLogRepo::list_by_project(&store, project_id)
    };

    let summary = state.assistant.summarize_daily_logs(&logs).await;
    Ok(Json(DataResponse {
        data: LogSummary {
            project_id,
            logs: logs.len(),
            summary,
        },
    }))
}
