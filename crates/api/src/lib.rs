//! Groundwork API server library.
//!
//! Exposes the core building blocks (config, state, error handling, routes)
//! so integration tests and the binary entrypoint can both access them.

pub mod audit;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use groundwork_assist::gemini::GeminiClient;
use groundwork_assist::{Assistant, OfflineGenerator, SimulatedScanner, TextGenerator};

use crate::config::ServerConfig;
use crate::state::AppState;

/// Assemble the application state described by `config`.
///
/// Without an API key every AI operation runs against the offline generator
/// and returns its documented fallback.
pub fn build_state(config: ServerConfig) -> AppState {
    let db = groundwork_db::create_database(config.seed_demo_data);

    let generator: Arc<dyn TextGenerator> = match &config.assist.api_key {
        Some(key) => {
            tracing::info!(model = %config.assist.model, "Using hosted text generation");
            Arc::new(GeminiClient::new(
                config.assist.base_url.clone(),
                config.assist.model.clone(),
                key.clone(),
            ))
        }
        None => {
            tracing::info!("No ASSIST_API_KEY set, AI features use their fallbacks");
            Arc::new(OfflineGenerator)
        }
    };

    let scanner = SimulatedScanner::new(
        config.scan_pass_rate,
        Duration::from_millis(config.scan_delay_ms),
    );

    AppState {
        db,
        assistant: Assistant::new(generator),
        scanner: Arc::new(scanner),
        config: Arc::new(config),
    }
}
