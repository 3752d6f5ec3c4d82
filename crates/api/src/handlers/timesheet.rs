//! Handlers for timesheets: clock-in/out, breaks and manager review.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use groundwork_core::audit::{TargetKind, TimesheetAction};
use groundwork_core::timesheet::TimesheetStatus;
use groundwork_core::types::DbId;
use groundwork_db::models::timesheet::{
    ClockIn, Timesheet, TimesheetView, UpdateTimesheetDetails, UpdateTimesheetStatus,
};
use groundwork_db::repositories::{TimesheetRepo, UserRepo};
use groundwork_db::Store;

use crate::audit;
use crate::error::AppResult;
use crate::middleware::actor::Actor;
use crate::response::DataResponse;
use crate::state::AppState;

fn views(sheets: Vec<Timesheet>) -> Vec<TimesheetView> {
    let now = Utc::now();
    sheets.into_iter().map(|t| t.view(now)).collect()
}

/// `for <user name>`, as shown in the activity feed.
fn subject(store: &Store, user_id: DbId) -> String {
    let name = UserRepo::find_by_id(store, user_id)
        .map(|u| u.name)
        .unwrap_or_else(|| "Unknown User".to_string());
    format!("for {name}")
}

// ---------------------------------------------------------------------------
// Shift lifecycle
// ---------------------------------------------------------------------------

/// POST /api/v1/timesheets/clock-in
///
/// Scores the reported location against the project geofence. A flagged
/// clock-in is recorded in the audit log with the worker as actor.
pub async fn clock_in(
    State(state): State<AppState>,
    actor: Actor,
    Json(input): Json<ClockIn>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let (sheet, assessment) = TimesheetRepo::clock_in(&mut store, &input)?;

    if sheet.status == TimesheetStatus::Flagged {
        let name = subject(&store, sheet.user_id);
        audit::record(
            &mut store,
            Some(sheet.project_id),
            sheet.user_id,
            TimesheetAction::FlaggedForReview,
            audit::target(TargetKind::Timesheet, sheet.id, name),
        );
    }

    tracing::info!(
        timesheet_id = sheet.id,
        user_id = sheet.user_id,
        project_id = sheet.project_id,
        trust_score = assessment.score,
        flagged = assessment.flagged,
        actor_id = actor.user_id,
        "Clocked in",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: sheet.view(Utc::now()),
        }),
    ))
}

/// POST /api/v1/timesheets/{id}/clock-out
pub async fn clock_out(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let sheet = TimesheetRepo::clock_out(&mut *state.db.write().await, id)?;
    tracing::info!(timesheet_id = id, user_id = sheet.user_id, actor_id = actor.user_id, "Clocked out");
    Ok(Json(DataResponse {
        data: sheet.view(Utc::now()),
    }))
}

/// POST /api/v1/timesheets/{id}/breaks/start
pub async fn start_break(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let sheet = TimesheetRepo::start_break(&mut *state.db.write().await, id)?;
    tracing::info!(timesheet_id = id, actor_id = actor.user_id, "Break started");
    Ok(Json(DataResponse {
        data: sheet.view(Utc::now()),
    }))
}

/// POST /api/v1/timesheets/{id}/breaks/end
pub async fn end_break(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let sheet = TimesheetRepo::end_break(&mut *state.db.write().await, id)?;
    tracing::info!(timesheet_id = id, actor_id = actor.user_id, "Break ended");
    Ok(Json(DataResponse {
        data: sheet.view(Utc::now()),
    }))
}

// ---------------------------------------------------------------------------
// Review and details
// ---------------------------------------------------------------------------

/// PUT /api/v1/timesheets/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTimesheetStatus>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let (sheet, action) = TimesheetRepo::update_status(&mut store, id, input.status)?;
    let name = subject(&store, sheet.user_id);
    audit::record(
        &mut store,
        Some(sheet.project_id),
        actor.user_id,
        action,
        audit::target(TargetKind::Timesheet, sheet.id, name),
    );

    tracing::info!(
        timesheet_id = id,
        actor_id = actor.user_id,
        status = ?sheet.status,
        "Timesheet reviewed",
    );
    Ok(Json(DataResponse {
        data: sheet.view(Utc::now()),
    }))
}

/// PUT /api/v1/timesheets/{id}
///
/// Comment and work type changes are not audited.
pub async fn update_details(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTimesheetDetails>,
) -> AppResult<impl IntoResponse> {
    let sheet = TimesheetRepo::update_details(&mut *state.db.write().await, id, &input)?;
    tracing::debug!(timesheet_id = id, actor_id = actor.user_id, "Timesheet details updated");
    Ok(Json(DataResponse {
        data: sheet.view(Utc::now()),
    }))
}

/// GET /api/v1/timesheets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let sheet = TimesheetRepo::require(&*state.db.read().await, id)?;
    Ok(Json(DataResponse {
        data: sheet.view(Utc::now()),
    }))
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/{project_id}/timesheets
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let sheets = TimesheetRepo::list_by_project(&*state.db.read().await, project_id);
    Ok(Json(DataResponse { data: views(sheets) }))
}

/// GET /api/v1/users/{user_id}/timesheets
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let sheets = TimesheetRepo::list_by_user(&*state.db.read().await, user_id);
    Ok(Json(DataResponse { data: views(sheets) }))
}

/// GET /api/v1/companies/{company_id}/timesheets/flagged
pub async fn list_flagged(
    State(state): State<AppState>,
    Path(company_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let sheets = TimesheetRepo::list_flagged_by_company(&*state.db.read().await, company_id);
    Ok(Json(DataResponse { data: views(sheets) }))
}
