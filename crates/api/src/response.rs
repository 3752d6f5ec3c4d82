//! Response shapes shared by API handlers.
//!
//! JSON responses use a `{ "data": ... }` envelope via [`DataResponse`].
//! Streaming endpoints emit Server-Sent Events built here so every stream
//! names and encodes its events the same way.

use axum::response::sse::Event;
use serde::Serialize;
use tokio_stream::wrappers::ReceiverStream;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Event stream fed by a background task through an mpsc channel.
pub type EventStream = ReceiverStream<Result<Event, axum::Error>>;

/// Payload of a `progress` event.
#[derive(Debug, Serialize)]
pub struct UploadProgress {
    pub chunk: u64,
    pub total_chunks: u64,
    pub progress: f64,
}

/// Payload of the final `complete` event.
#[derive(Debug, Serialize)]
pub struct UploadComplete {
    pub success: bool,
}

pub fn progress_event(progress: UploadProgress) -> Result<Event, axum::Error> {
    Event::default().event("progress").json_data(progress)
}

pub fn complete_event() -> Result<Event, axum::Error> {
    Event::default()
        .event("complete")
        .json_data(UploadComplete { success: true })
}
