use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use groundwork_assist::AssistError;
use groundwork_core::error::CoreError;
use serde_json::json;

/// Error returned by every HTTP handler.
///
/// Rendered as `{ "error": <message>, "code": <CODE> }`. Internal causes and
/// assistant failures are logged and replaced by a generic message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `groundwork_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The text-generation service failed on an operation without a fallback.
    #[error("Assistant error: {0}")]
    Assist(#[from] AssistError),

    /// Malformed input caught at the HTTP layer.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Shown to clients when the assistant fails; the cause is only logged.
pub const ASSISTANT_FAILED: &str =
    "The AI assistant could not complete this request. Please try again.";

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl AppError {
    /// Status, machine-readable code and client-facing message.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(err) => classify_core_error(err),
            AppError::Assist(err) => {
                tracing::error!(error = %err, "Assistant request failed");
                internal(ASSISTANT_FAILED)
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal(INTERNAL_MESSAGE)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        (status, axum::Json(json!({ "error": message, "code": code }))).into_response()
    }
}

/// Map a domain error onto its HTTP status.
///
/// - `NotFound` maps to 404 with the entity name and id.
/// - `Validation` maps to 400, `Conflict` to 409.
/// - `Internal` maps to 500 with a sanitized message.
fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal(INTERNAL_MESSAGE)
        }
    }
}

fn internal(message: &str) -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        message.to_string(),
    )
}
