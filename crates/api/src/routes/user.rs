//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{document, project, timesheet, user};
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /                               -> user::invite
/// GET    /{id}                           -> user::get_by_id
/// PUT    /{id}                           -> user::update
/// GET    /{id}/projects                  -> project::list_by_user
/// GET    /{id}/managed-projects          -> project::list_by_manager
/// GET    /{id}/timesheets                -> timesheet::list_by_user
/// GET    /{id}/acknowledgements          -> document::list_acknowledgements_by_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(user::invite))
        .route("/{id}", get(user::get_by_id).put(user::update))
        .route("/{id}/projects", get(project::list_by_user))
        .route("/{id}/managed-projects", get(project::list_by_manager))
        .route("/{id}/timesheets", get(timesheet::list_by_user))
        .route(
            "/{id}/acknowledgements",
            get(document::list_acknowledgements_by_user),
        )
}
