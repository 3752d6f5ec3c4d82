pub mod audit;
pub mod company;
pub mod document;
pub mod field;
pub mod health;
pub mod project;
pub mod timesheet;
pub mod todo;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /companies                                       list
/// /companies/{id}/settings                         get, update
/// /companies/{id}/{sites,users,projects,...}       company-scoped listings
/// /companies/{id}/activity                         recent audit feed
///
/// /sites                                           create
///
/// /users                                           invite
/// /users/{id}                                      get, update
/// /users/{id}/{projects,timesheets,...}            user-scoped listings
///
/// /projects                                        create
/// /projects/{id}                                   get, update
/// /projects/{id}/members/{user_id}                 assign, unassign
/// /projects/{id}/health-report                     AI health report
/// /projects/{id}/cost-estimate                     AI cost estimate (POST)
/// /projects/{id}/todos/generate                    AI task breakdown (POST)
/// /projects/{id}/safety-analysis                   AI trend analysis (POST)
/// /projects/{id}/{timesheets,documents,...}        project-scoped listings
///
/// /timesheets/clock-in                             geofenced clock-in (POST)
/// /timesheets/{id}/{clock-out,breaks/*,status}     shift lifecycle, review
///
/// /documents                                       initiate upload, list
/// /documents/search                                cross-document AI search
/// /documents/{id}/{upload,finalize}                chunked upload (SSE), scan
/// /documents/{id}/{revert,links,ask,...}           versions, links, AI
/// /document-groups/{id}/versions                   version history
///
/// /todos                                           create
/// /todos/{id}/{subtasks,comments,...}              to-do details
///
/// /incidents                                       report
/// /daily-logs                                      create
/// /rfis                                            create, get, update
/// /equipment/{id}/{assignment,status}              fleet
/// /resource-assignments                            schedule
///
/// /audit-logs/verify                               hash chain check
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Companies, settings and company-scoped listings.
        .nest("/companies", company::router())
        .nest("/sites", company::site_router())
        .nest("/users", user::router())
        // Projects, teams and project-scoped listings.
        .nest("/projects", project::router())
        // Geofenced time tracking.
        .nest("/timesheets", timesheet::router())
        // Document pipeline, lineages and links.
        .nest("/documents", document::router())
        .nest("/document-groups", document::group_router())
        .nest("/todos", todo::router())
        // Site records.
        .nest("/incidents", field::incident_router())
        .nest("/daily-logs", field::daily_log_router())
        .nest("/rfis", field::rfi_router())
        .nest("/equipment", field::equipment_router())
        .nest("/resource-assignments", field::resource_router())
        .nest("/audit-logs", audit::router())
}
