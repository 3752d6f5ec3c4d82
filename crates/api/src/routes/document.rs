//! Route definitions for documents and document lineages.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::document;
use crate::state::AppState;

/// Routes mounted at `/documents`.
///
/// ```text
/// GET    /?project_ids=1,2                 -> list_by_projects
/// POST   /                                 -> initiate_upload
/// POST   /search                           -> search
/// GET    /{id}                             -> get_by_id
/// DELETE /{id}                             -> abort_upload
/// POST   /{id}/upload                      -> upload (SSE)
/// POST   /{id}/finalize                    -> finalize_upload
/// POST   /{id}/revert                      -> revert
/// POST   /{id}/links                       -> link
/// DELETE /{id}/links/{target_id}           -> unlink
/// GET    /{id}/link-suggestions            -> suggest_links
/// POST   /{id}/acknowledge                 -> acknowledge
/// POST   /{id}/ask                         -> ask
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(document::list_by_projects).post(document::initiate_upload),
        )
        .route("/search", post(document::search))
        .route(
            "/{id}",
            get(document::get_by_id).delete(document::abort_upload),
        )
        .route("/{id}/upload", post(document::upload))
        .route("/{id}/finalize", post(document::finalize_upload))
        .route("/{id}/revert", post(document::revert))
        .route("/{id}/links", post(document::link))
        .route("/{id}/links/{target_id}", delete(document::unlink))
        .route("/{id}/link-suggestions", get(document::suggest_links))
        .route("/{id}/acknowledge", post(document::acknowledge))
        .route("/{id}/ask", post(document::ask))
}

/// Routes mounted at `/document-groups`.
///
/// ```text
/// GET    /{id}/versions                    -> history
/// ```
pub fn group_router() -> Router<AppState> {
    Router::new().route("/{id}/versions", get(document::history))
}
