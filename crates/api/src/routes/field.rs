//! Route definitions for site records: incidents, daily logs, RFIs,
//! equipment and the resource schedule.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{daily_log, equipment, rfi, safety};
use crate::state::AppState;

/// Routes mounted at `/incidents`.
///
/// ```text
/// POST   /                 -> report
/// PUT    /{id}/status      -> update_status
/// ```
pub fn incident_router() -> Router<AppState> {
    Router::new()
        .route("/", post(safety::report))
        .route("/{id}/status", put(safety::update_status))
}

/// Routes mounted at `/daily-logs`.
///
/// ```text
/// POST   /                 -> create
/// ```
pub fn daily_log_router() -> Router<AppState> {
    Router::new().route("/", post(daily_log::create))
}

/// Routes mounted at `/rfis`.
///
/// ```text
/// POST   /                 -> create
/// GET    /{id}             -> get_by_id
/// PUT    /{id}             -> update
/// ```
pub fn rfi_router() -> Router<AppState> {
    Router::new()
        .route("/", post(rfi::create))
        .route("/{id}", get(rfi::get_by_id).put(rfi::update))
}

/// Routes mounted at `/equipment`.
///
/// ```text
/// PUT    /{id}/assignment  -> assign
/// DELETE /{id}/assignment  -> unassign
/// PUT    /{id}/status      -> update_status
/// ```
pub fn equipment_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}/assignment",
            put(equipment::assign).delete(equipment::unassign),
        )
        .route("/{id}/status", put(equipment::update_status))
}

/// Routes mounted at `/resource-assignments`.
///
/// ```text
/// POST   /                 -> create_assignment
/// DELETE /{id}             -> delete_assignment
/// ```
pub fn resource_router() -> Router<AppState> {
    Router::new()
        .route("/", post(equipment::create_assignment))
        .route("/{id}", delete(equipment::delete_assignment))
}
