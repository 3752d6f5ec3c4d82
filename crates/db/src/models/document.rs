use groundwork_core::document::{DocumentCategory, DocumentStatus};
use groundwork_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::Record;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// Document as stored. Links live in the store's link graph.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentRecord {
    pub id: DbId,
    pub name: String,
    pub url: String,
    pub project_id: DbId,
    pub status: DocumentStatus,
    pub uploaded_at: Timestamp,
    pub category: DocumentCategory,
    pub indexed_content: String,
    pub version: i32,
    pub document_group_id: DbId,
    pub creator_id: DbId,
}

impl Record for DocumentRecord {
    fn id(&self) -> DbId {
        self.id
    }
}

/// Document with its symmetric link set.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    #[serde(flatten)]
    pub record: DocumentRecord,
    pub related_document_ids: Vec<DbId>,
}

/// All versions of one lineage, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct VersionHistory {
    pub document_group_id: DbId,
    pub latest: Document,
    pub versions: Vec<Document>,
}

/// Result of a security scan, applied when finalizing an upload.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    Approved { indexed_content: String },
    Quarantined,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentAcknowledgement {
    pub id: DbId,
    pub user_id: DbId,
    pub document_id: DbId,
    pub acknowledged_at: Timestamp,
}

impl Record for DocumentAcknowledgement {
    fn id(&self) -> DbId {
        self.id
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct InitiateUpload {
    pub name: String,
    pub project_id: DbId,
    pub category: DocumentCategory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkDocuments {
    pub target_id: DbId,
}
