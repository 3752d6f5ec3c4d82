//! Route definitions for the `/todos` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::todo;
use crate::state::AppState;

/// Routes mounted at `/todos`.
///
/// ```text
/// POST   /                                 -> create
/// GET    /{id}                             -> get_by_id
/// PUT    /{id}                             -> update
/// DELETE /{id}                             -> delete
/// PUT    /{id}/reminder                    -> set_reminder
/// PUT    /{id}/dependency                  -> set_dependency
/// POST   /{id}/subtasks                    -> add_subtask
/// PUT    /{id}/subtasks/{sub_task_id}      -> update_subtask
/// DELETE /{id}/subtasks/{sub_task_id}      -> delete_subtask
/// POST   /{id}/comments                    -> add_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(todo::create))
        .route(
            "/{id}",
            get(todo::get_by_id).put(todo::update).delete(todo::delete),
        )
        .route("/{id}/reminder", put(todo::set_reminder))
        .route("/{id}/dependency", put(todo::set_dependency))
        .route("/{id}/subtasks", post(todo::add_subtask))
        .route(
            "/{id}/subtasks/{sub_task_id}",
            put(todo::update_subtask).delete(todo::delete_subtask),
        )
        .route("/{id}/comments", post(todo::add_comment))
}
