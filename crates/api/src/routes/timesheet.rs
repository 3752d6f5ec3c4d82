//! Route definitions for the `/timesheets` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::timesheet;
use crate::state::AppState;

/// Routes mounted at `/timesheets`.
///
/// ```text
/// POST   /clock-in                -> clock_in
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update_details
/// POST   /{id}/clock-out          -> clock_out
/// POST   /{id}/breaks/start       -> start_break
/// POST   /{id}/breaks/end         -> end_break
/// PUT    /{id}/status             -> update_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/clock-in", post(timesheet::clock_in))
        .route(
            "/{id}",
            get(timesheet::get_by_id).put(timesheet::update_details),
        )
        .route("/{id}/clock-out", post(timesheet::clock_out))
        .route("/{id}/breaks/start", post(timesheet::start_break))
        .route("/{id}/breaks/end", post(timesheet::end_break))
        .route("/{id}/status", put(timesheet::update_status))
}
