//! Handlers for companies, their settings and sites.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use groundwork_core::types::DbId;
use groundwork_db::models::company::UpdateCompanySettings;
use groundwork_db::models::site::CreateSite;
use groundwork_db::repositories::{CompanyRepo, SiteRepo};

use crate::error::AppResult;
use crate::middleware::actor::Actor;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/companies
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let companies = CompanyRepo::list(&*state.db.read().await);
    Ok(Json(DataResponse { data: companies }))
}

/// GET /api/v1/companies/{company_id}/settings
pub async fn get_settings(
    State(state): State<AppState>,
    Path(company_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let settings = CompanyRepo::find_settings(&*state.db.read().await, company_id)?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/companies/{company_id}/settings
///
/// Notification preferences are merged into the stored ones.
pub async fn update_settings(
    State(state): State<AppState>,
    actor: Actor,
    Path(company_id): Path<DbId>,
    Json(input): Json<UpdateCompanySettings>,
) -> AppResult<impl IntoResponse> {
    let settings =
        CompanyRepo::update_settings(&mut *state.db.write().await, company_id, &input)?;
    tracing::info!(company_id, actor_id = actor.user_id, "Company settings updated");
    Ok(Json(DataResponse { data: settings }))
}

/// GET /api/v1/companies/{company_id}/sites
pub async fn list_sites(
    State(state): State<AppState>,
    Path(company_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let sites = SiteRepo::list_by_company(&*state.db.read().await, company_id);
    Ok(Json(DataResponse { data: sites }))
}

/// POST /api/v1/sites
pub async fn create_site(
    State(state): State<AppState>,
    actor: Actor,
    Json(input): Json<CreateSite>,
) -> AppResult<impl IntoResponse> {
    let site = SiteRepo::create(&mut *state.db.write().await, &input)?;
    tracing::info!(
        site_id = site.id,
        company_id = site.company_id,
        actor_id = actor.user_id,
        "Site created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: site })))
}
