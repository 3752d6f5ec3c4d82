//! Handlers for users.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use groundwork_core::types::DbId;
use groundwork_db::models::user::{InviteUser, UpdateUser};
use groundwork_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::middleware::actor::Actor;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/users
pub async fn invite(
    State(state): State<AppState>,
    actor: Actor,
    Json(input): Json<InviteUser>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::invite(&mut *state.db.write().await, &input)?;
    tracing::info!(
        user_id = user.id,
        company_id = user.company_id,
        role = user.role.label(),
        actor_id = actor.user_id,
        "User invited",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::require(&*state.db.read().await, id)?;
    Ok(Json(DataResponse { data: user }))
}

/// PUT /api/v1/users/{id}
pub async fn update(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::update(&mut *state.db.write().await, id, &input)?;
    tracing::info!(user_id = id, actor_id = actor.user_id, "User updated");
    Ok(Json(DataResponse { data: user }))
}

/// GET /api/v1/companies/{company_id}/users
pub async fn list_by_company(
    State(state): State<AppState>,
    Path(company_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let users = UserRepo::list_by_company(&*state.db.read().await, company_id);
    Ok(Json(DataResponse { data: users }))
}

/// GET /api/v1/projects/{project_id}/members
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let users = UserRepo::list_by_project(&*state.db.read().await, project_id);
    Ok(Json(DataResponse { data: users }))
}
