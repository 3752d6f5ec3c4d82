//! Route definitions for the `/projects` resource.
//!
//! Also nests every project-scoped listing and assessment under
//! `/projects/{id}/...`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{audit, daily_log, document, project, rfi, safety, timesheet, todo, user};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// POST   /                                  -> project::create
/// GET    /{id}                              -> project::get_by_id
/// PUT    /{id}                              -> project::update
///
/// GET    /{id}/members                      -> user::list_by_project
/// PUT    /{id}/members/{user_id}            -> project::assign_user
/// DELETE /{id}/members/{user_id}            -> project::unassign_user
/// GET    /{id}/unassigned-users             -> project::list_unassigned
///
/// GET    /{id}/health-report                -> project::health_report
/// POST   /{id}/cost-estimate                -> project::estimate_costs
///
/// GET    /{id}/timesheets                   -> timesheet::list_by_project
/// GET    /{id}/documents                    -> document::list_by_project
/// GET    /{id}/acknowledgements             -> document::list_acknowledgements_by_project
/// GET    /{id}/todos                        -> todo::list_by_project
/// GET    /{id}/todos/board                  -> todo::board
/// POST   /{id}/todos/generate               -> todo::generate
/// GET    /{id}/incidents                    -> safety::list_by_project
/// POST   /{id}/safety-analysis              -> safety::analyze
/// GET    /{id}/daily-logs                   -> daily_log::list_by_project
/// GET    /{id}/daily-logs/summary           -> daily_log::summarize
/// GET    /{id}/rfis                         -> rfi::list_by_project
/// POST   /{id}/rfis/suggest-assignee        -> rfi::suggest_assignee
/// GET    /{id}/audit-logs                   -> audit::list_by_project
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(project::create))
        .route("/{id}", get(project::get_by_id).put(project::update))
        // Team.
        .route("/{id}/members", get(user::list_by_project))
        .route(
            "/{id}/members/{user_id}",
            put(project::assign_user).delete(project::unassign_user),
        )
        .route("/{id}/unassigned-users", get(project::list_unassigned))
        // Assessments.
        .route("/{id}/health-report", get(project::health_report))
        .route("/{id}/cost-estimate", post(project::estimate_costs))
        // Field records.
        .route("/{id}/timesheets", get(timesheet::list_by_project))
        .route("/{id}/documents", get(document::list_by_project))
        .route(
            "/{id}/acknowledgements",
            get(document::list_acknowledgements_by_project),
        )
        .route("/{id}/todos", get(todo::list_by_project))
        .route("/{id}/todos/board", get(todo::board))
        .route("/{id}/todos/generate", post(todo::generate))
        .route("/{id}/incidents", get(safety::list_by_project))
        .route("/{id}/safety-analysis", post(safety::analyze))
        .route("/{id}/daily-logs", get(daily_log::list_by_project))
        .route("/{id}/daily-logs/summary", get(daily_log::summarize))
        .route("/{id}/rfis", get(rfi::list_by_project))
        .route("/{id}/rfis/suggest-assignee", post(rfi::suggest_assignee))
        .route("/{id}/audit-logs", get(audit::list_by_project))
}
