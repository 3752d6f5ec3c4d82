//! Acting-user extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use groundwork_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Header naming the user on whose behalf a request is made.
pub const ACTOR_HEADER: &str = "x-actor-id";

/// The user recorded as the actor in audit entries.
///
/// The header identifies the actor; it does not authenticate them.
///
/// ```ignore
/// async fn my_handler(actor: Actor) -> AppResult<Json<()>> {
///     tracing::info!(actor_id = actor.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for Actor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::BadRequest(format!("Missing {ACTOR_HEADER} header")))?;

        let user_id = raw.trim().parse::<DbId>().map_err(|_| {
            AppError::BadRequest(format!("{ACTOR_HEADER} must be a numeric user id"))
        })?;

        Ok(Actor { user_id })
    }
}
