//! Route definitions for companies and sites.
//!
//! Company-scoped listings of other resources live here too, so every
//! `/companies/{id}/...` path is registered in one place.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{audit, company, document, equipment, project, timesheet, user};
use crate::state::AppState;

/// Routes mounted at `/companies`.
///
/// ```text
/// GET    /                               -> company::list
/// GET    /{id}/settings                  -> company::get_settings
/// PUT    /{id}/settings                  -> company::update_settings
/// GET    /{id}/sites                     -> company::list_sites
/// GET    /{id}/users                     -> user::list_by_company
/// GET    /{id}/projects                  -> project::list_by_company
/// GET    /{id}/health-reports            -> project::company_health_reports
/// GET    /{id}/documents                 -> document::list_by_company
/// GET    /{id}/timesheets/flagged        -> timesheet::list_flagged
/// GET    /{id}/equipment                 -> equipment::list_by_company
/// GET    /{id}/resource-assignments      -> equipment::list_assignments
/// GET    /{id}/activity                  -> audit::recent_for_company
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(company::list))
        .route(
            "/{id}/settings",
            get(company::get_settings).put(company::update_settings),
        )
        .route("/{id}/sites", get(company::list_sites))
        .route("/{id}/users", get(user::list_by_company))
        .route("/{id}/projects", get(project::list_by_company))
        .route("/{id}/health-reports", get(project::company_health_reports))
        .route("/{id}/documents", get(document::list_by_company))
        .route("/{id}/timesheets/flagged", get(timesheet::list_flagged))
        .route("/{id}/equipment", get(equipment::list_by_company))
        .route(
            "/{id}/resource-assignments",
            get(equipment::list_assignments),
        )
        .route("/{id}/activity", get(audit::recent_for_company))
}

/// Routes mounted at `/sites`.
///
/// ```text
/// POST   /                               -> create_site
/// ```
pub fn site_router() -> Router<AppState> {
    Router::new().route("/", post(company::create_site))
}
