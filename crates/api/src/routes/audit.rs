//! Route definitions for the audit log.

use axum::routing::get;
use axum::Router;

use crate::handlers::audit;
use crate::state::AppState;

/// Audit routes mounted at `/audit-logs`.
///
/// Project and company feeds are mounted under their owners.
///
/// ```text
/// GET  /verify                 -> verify_chain
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/verify", get(audit::verify_chain))
}
