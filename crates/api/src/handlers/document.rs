//! Handlers for documents: the upload pipeline, versions, links,
//! acknowledgements and document-grounded AI.
//!
//! Upload lifecycle:
//!
//! ```text
//! POST /documents              -> Uploading
//! POST /documents/{id}/upload  -> SSE progress while the file streams
//! POST /documents/{id}/finalize-> Scanning -> Approved | Quarantined
//! DELETE /documents/{id}       -> abandoned upload removed
//! ```

use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::sse::{KeepAlive, KeepAliveStream, Sse};
use axum::response::IntoResponse;
use axum::Json;
use groundwork_assist::assistant::SearchAnswer;
use groundwork_assist::ScanVerdict;
use groundwork_core::audit::{AssistantAction, DocumentAction, TargetKind};
use groundwork_core::document::{revert_description, DocumentStatus};
use groundwork_core::error::CoreError;
use groundwork_core::types::DbId;
use groundwork_core::upload::{
    progress_percent, total_chunks, within_upload_limit, MAX_UPLOAD_BYTES,
};
use groundwork_db::models::document::{
    Document, DocumentRecord, InitiateUpload, LinkDocuments, ScanOutcome,
};
use groundwork_db::repositories::{AcknowledgementRepo, DocumentRepo};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::actor::Actor;
use crate::response::{complete_event, progress_event, DataResponse, EventStream, UploadProgress};
use crate::state::AppState;

/// Longest query prefix kept in the search audit description.
const SEARCH_AUDIT_PREFIX_CHARS: usize = 30;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ChunkedUploadRequest {
    pub file_size_bytes: u64,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub document_id: DbId,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct LinkSuggestions {
    pub document_id: DbId,
    pub suggested_ids: Vec<DbId>,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub project_ids: Vec<DbId>,
}

/// `?project_ids=1,2,3`
#[derive(Debug, Deserialize)]
pub struct ProjectIdsParams {
    pub project_ids: Option<String>,
}

fn parse_project_ids(raw: Option<&str>) -> AppResult<Vec<DbId>> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<DbId>()
                .map_err(|_| AppError::BadRequest(format!("Invalid project id '{s}'")))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Upload pipeline
// ---------------------------------------------------------------------------

/// POST /api/v1/documents
///
/// Reserves the document in `Uploading`. Re-using a name within a project
/// starts the next version of that lineage.
pub async fn initiate_upload(
    State(state): State<AppState>,
    actor: Actor,
    Json(input): Json<InitiateUpload>,
) -> AppResult<impl IntoResponse> {
    let document = DocumentRepo::initiate_upload(&mut *state.db.write().await, &input, actor.user_id)?;
    tracing::info!(
        document_id = document.record.id,
        document_group_id = document.record.document_group_id,
        version = document.record.version,
        actor_id = actor.user_id,
        "Document upload initiated",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: document })))
}

/// POST /api/v1/documents/{id}/upload
///
/// Streams simulated chunk progress as Server-Sent Events: one `progress`
/// event per 1 MiB chunk, then a `complete` event.
pub async fn upload(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
    Json(input): Json<ChunkedUploadRequest>,
) -> AppResult<Sse<KeepAliveStream<EventStream>>> {
    if !within_upload_limit(input.file_size_bytes) {
        return Err(AppError::BadRequest(format!(
            "File size {} exceeds the {MAX_UPLOAD_BYTES} byte upload limit",
            input.file_size_bytes
        )));
    }
    DocumentRepo::require_uploading(&*state.db.read().await, id)?;

    let total = total_chunks(input.file_size_bytes);
    let delay = Duration::from_millis(state.config.upload_chunk_delay_ms);
    let (tx, rx) = mpsc::channel(16);

    tracing::info!(
        document_id = id,
        file_size_bytes = input.file_size_bytes,
        total_chunks = total,
        actor_id = actor.user_id,
        "Chunked upload started",
    );

    tokio::spawn(async move {
        for chunk in 1..=total {
            tokio::time::sleep(delay).await;
            let event = progress_event(UploadProgress {
                chunk,
                total_chunks: total,
                progress: progress_percent(chunk, total),
            });
            if tx.send(event).await.is_err() {
                tracing::debug!(document_id = id, chunk, "Upload client went away");
                return;
            }
        }
        let _ = tx.send(complete_event()).await;
        tracing::debug!(document_id = id, "Chunked upload finished");
    });

    Ok(Sse::new(ReceiverStream::new(rx)).keep_alive(KeepAlive::default()))
}

/// DELETE /api/v1/documents/{id}
///
/// Only a document whose upload never finished can be removed.
pub async fn abort_upload(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let removed = DocumentRepo::abort_upload(&mut *state.db.write().await, id)?;
    tracing::info!(
        document_id = id,
        name = %removed.name,
        actor_id = actor.user_id,
        "Document upload aborted",
    );
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/documents/{id}/finalize
///
/// Runs the security scan and, for clean files, content indexing. The store
/// is not locked while the collaborators run. A scanner failure quarantines
/// the file.
///
/// Everything after `Scanning` runs on its own task, so a dropped request
/// still leaves the document `Approved` or `Quarantined`.
pub async fn finalize_upload(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let record = DocumentRepo::begin_scan(&mut *state.db.write().await, id)?;

    let task = tokio::spawn(scan_and_settle(state, record, actor.user_id));
    let document = task
        .await
        .map_err(|e| AppError::InternalError(format!("Scan task failed: {e}")))??;

    tracing::info!(
        document_id = id,
        status = document.record.status.label(),
        actor_id = actor.user_id,
        "Document upload finalized",
    );
    Ok(Json(DataResponse { data: document }))
}

async fn scan_and_settle(
    state: AppState,
    record: DocumentRecord,
    actor_id: DbId,
) -> Result<Document, CoreError> {
    let id = record.id;
    let verdict = match state.scanner.scan(&record.name).await {
        Ok(verdict) => verdict,
        Err(e) => {
            tracing::warn!(document_id = id, error = %e, "Security scan failed, quarantining");
            ScanVerdict::Infected
        }
    };
    let outcome = match verdict {
        ScanVerdict::Clean => ScanOutcome::Approved {
            indexed_content: state
                .assistant
                .index_document(&record.name, record.category)
                .await,
        },
        ScanVerdict::Infected => ScanOutcome::Quarantined,
    };

    let mut store = state.db.write().await;
    let document = DocumentRepo::complete_scan(&mut store, id, outcome)?;
    if document.record.status == DocumentStatus::Approved {
        audit::record(
            &mut store,
            Some(document.record.project_id),
            actor_id,
            DocumentAction::Uploaded,
            audit::target(TargetKind::Document, id, document.record.name.clone()),
        );
    }
    Ok(document)
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/documents/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let document = DocumentRepo::require(&*state.db.read().await, id)?;
    Ok(Json(DataResponse { data: document }))
}

/// GET /api/v1/documents?project_ids=1,2
pub async fn list_by_projects(
    State(state): State<AppState>,
    Query(params): Query<ProjectIdsParams>,
) -> AppResult<impl IntoResponse> {
    let project_ids = parse_project_ids(params.project_ids.as_deref())?;
    let documents = DocumentRepo::list_by_projects(&*state.db.read().await, &project_ids);
    Ok(Json(DataResponse { data: documents }))
}

/// GET /api/v1/projects/{project_id}/documents
///
/// Newest upload first.
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let documents = DocumentRepo::list_by_project(&*state.db.read().await, project_id);
    Ok(Json(DataResponse { data: documents }))
}

/// GET /api/v1/companies/{company_id}/documents
pub async fn list_by_company(
    State(state): State<AppState>,
    Path(company_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let documents = DocumentRepo::list_by_company(&*state.db.read().await, company_id);
    Ok(Json(DataResponse { data: documents }))
}

/// GET /api/v1/document-groups/{group_id}/versions
pub async fn history(
    State(state): State<AppState>,
    Path(group_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let history = DocumentRepo::history(&*state.db.read().await, group_id)?;
    Ok(Json(DataResponse { data: history }))
}

// ---------------------------------------------------------------------------
// Versions and links
// ---------------------------------------------------------------------------

/// POST /api/v1/documents/{id}/revert
///
/// Copies the given version into a new top version; history is untouched.
pub async fn revert(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let (document, reverted_from) = DocumentRepo::revert_to_version(&mut store, id)?;
    audit::record(
        &mut store,
        Some(document.record.project_id),
        actor.user_id,
        DocumentAction::VersionReverted,
        audit::target(
            TargetKind::Document,
            document.record.id,
            revert_description(&document.record.name, reverted_from),
        ),
    );

    tracing::info!(
        document_id = document.record.id,
        reverted_from_id = id,
        version = document.record.version,
        actor_id = actor.user_id,
        "Document version reverted",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: document })))
}

/// POST /api/v1/documents/{id}/links
pub async fn link(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
    Json(input): Json<LinkDocuments>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let (source, target) = DocumentRepo::link(&mut store, id, input.target_id)?;
    audit::record(
        &mut store,
        Some(source.project_id),
        actor.user_id,
        DocumentAction::LinkAdded,
        audit::target(
            TargetKind::Document,
            source.id,
            format!("'{}' to '{}'", source.name, target.name),
        ),
    );
    let document = DocumentRepo::require(&store, id)?;

    tracing::info!(document_id = id, target_id = input.target_id, actor_id = actor.user_id, "Documents linked");
    Ok(Json(DataResponse { data: document }))
}

/// DELETE /api/v1/documents/{id}/links/{target_id}
pub async fn unlink(
    State(state): State<AppState>,
    actor: Actor,
    Path((id, target_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let (source, target) = DocumentRepo::unlink(&mut store, id, target_id)?;
    audit::record(
        &mut store,
        Some(source.project_id),
        actor.user_id,
        DocumentAction::LinkRemoved,
        audit::target(
            TargetKind::Document,
            source.id,
            format!("link between '{}' and '{}'", source.name, target.name),
        ),
    );
    let document = DocumentRepo::require(&store, id)?;

    tracing::info!(document_id = id, target_id, actor_id = actor.user_id, "Documents unlinked");
    Ok(Json(DataResponse { data: document }))
}

/// GET /api/v1/documents/{id}/link-suggestions
///
/// Empty when the assistant is unavailable.
pub async fn suggest_links(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let (source, candidates) = DocumentRepo::link_candidates(&*state.db.read().await, id)?;
    let candidates: Vec<_> = candidates.into_iter().map(|d| d.record).collect();

    let suggested_ids = state.assistant.suggest_links(&source.record, &candidates).await;
    tracing::info!(document_id = id, candidates = candidates.len(), suggested = suggested_ids.len(), "Link suggestions produced");
    Ok(Json(DataResponse {
        data: LinkSuggestions {
            document_id: id,
            suggested_ids,
        },
    }))
}

// ---------------------------------------------------------------------------
// Acknowledgements
// ---------------------------------------------------------------------------

/// POST /api/v1/documents/{id}/acknowledge
///
/// Records that the acting user has read the document.
pub async fn acknowledge(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.db.write().await;
    let (ack, document) = AcknowledgementRepo::acknowledge(&mut store, actor.user_id, id)?;
    audit::record(
        &mut store,
        Some(document.project_id),
        actor.user_id,
        DocumentAction::Acknowledged,
        audit::target(TargetKind::Document, document.id, document.name),
    );

    tracing::info!(document_id = id, user_id = actor.user_id, "Document acknowledged");
    Ok((StatusCode::CREATED, Json(DataResponse { data: ack })))
}

/// GET /api/v1/projects/{project_id}/acknowledgements
pub async fn list_acknowledgements_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let acks = AcknowledgementRepo::list_by_project(&*state.db.read().await, project_id);
    Ok(Json(DataResponse { data: acks }))
}

/// GET /api/v1/users/{user_id}/acknowledgements
pub async fn list_acknowledgements_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let acks = AcknowledgementRepo::list_by_user(&*state.db.read().await, user_id);
    Ok(Json(DataResponse { data: acks }))
}

// ---------------------------------------------------------------------------
// Document AI
// ---------------------------------------------------------------------------

/// POST /api/v1/documents/{id}/ask
///
/// Answers strictly from the document's indexed content.
pub async fn ask(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
    Json(input): Json<AskRequest>,
) -> AppResult<impl IntoResponse> {
    if input.question.trim().is_empty() {
        return Err(AppError::BadRequest("Question must not be empty".into()));
    }
    let document = DocumentRepo::require(&*state.db.read().await, id)?.record;
    if document.status != DocumentStatus::Approved || document.indexed_content.is_empty() {
        return Err(CoreError::Conflict(format!(
            "Document '{}' has not been indexed",
            document.name
        ))
        .into());
    }

    let answer = state
        .assistant
        .ask_about_document(&document.indexed_content, input.question.trim())
        .await?;

    let mut store = state.db.write().await;
    audit::record(
        &mut store,
        Some(document.project_id),
        actor.user_id,
        DocumentAction::AiQuery,
        audit::target(TargetKind::Document, id, format!("on \"{}\"", document.name)),
    );

    tracing::info!(document_id = id, actor_id = actor.user_id, "Document question answered");
    Ok(Json(DataResponse {
        data: AskResponse {
            document_id: id,
            answer,
        },
    }))
}

/// POST /api/v1/documents/search
///
/// Synthesises one answer across the approved, indexed documents of the
/// given projects.
pub async fn search(
    State(state): State<AppState>,
    actor: Actor,
    Json(input): Json<SearchRequest>,
) -> AppResult<impl IntoResponse> {
    let query = input.query.trim();
    if query.is_empty() {
        return Err(AppError::BadRequest("Search query must not be empty".into()));
    }
    let documents = DocumentRepo::searchable(&*state.db.read().await, &input.project_ids);

    let answer: SearchAnswer = state.assistant.search_documents(query, &documents).await?;

    let prefix: String = query.chars().take(SEARCH_AUDIT_PREFIX_CHARS).collect();
    let mut store = state.db.write().await;
    audit::record(
        &mut store,
        None,
        actor.user_id,
        AssistantAction::ProjectSearch,
        audit::target(
            TargetKind::Project,
            input.project_ids.first().copied().unwrap_or(0),
            format!("Search: \"{prefix}...\""),
        ),
    );

    tracing::info!(
        actor_id = actor.user_id,
        searched = documents.len(),
        sources = answer.sources.len(),
        "Cross-document search answered",
    );
    Ok(Json(DataResponse { data: answer }))
}
