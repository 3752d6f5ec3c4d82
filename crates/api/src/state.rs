use std::sync::Arc;

use groundwork_assist::{Assistant, SecurityScanner};
use groundwork_db::Database;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every field is behind an `Arc` or is a handle.
#[derive(Clone)]
pub struct AppState {
    /// The in-memory store.
    pub db: Database,
    /// Typed facade over the text-generation service.
    pub assistant: Assistant,
    /// Upload security scanner used when finalizing documents.
    pub scanner: Arc<dyn SecurityScanner>,
    pub config: Arc<ServerConfig>,
}
