//! Documents: upload lifecycle, version lineage, links and acknowledgements.

use std::collections::HashSet;

use chrono::Utc;
use groundwork_core::document::{
    ensure_distinct, ensure_uploading, next_version, resolve_access_url, validate_name,
    DocumentStatus, QUARANTINE_NOTICE,
};
use groundwork_core::error::CoreError;
use groundwork_core::types::DbId;

use crate::models::document::{
    Document, DocumentAcknowledgement, DocumentRecord, InitiateUpload, ScanOutcome, VersionHistory,
};
use crate::repositories::ProjectRepo;
use crate::Store;

const ENTITY: &str = "Document";

// ---------------------------------------------------------------------------
// DocumentRepo
// ---------------------------------------------------------------------------

pub struct DocumentRepo;

impl DocumentRepo {
    /// Create a document in `Uploading`.
    ///
    /// A document with the same name in the same project makes this upload
    /// the next version of that lineage; otherwise a new lineage starts with
    /// `document_group_id == id` and version 1.
    pub fn initiate_upload(
        store: &mut Store,
        input: &InitiateUpload,
        creator_id: DbId,
    ) -> Result<Document, CoreError> {
        validate_name(&input.name)?;
        store.projects.require("Project", input.project_id)?;

        let id = store.documents.allocate_id();
        let existing_group = store
            .documents
            .iter()
            .find(|d| d.project_id == input.project_id && d.name == input.name)
            .map(|d| d.document_group_id);
        let (document_group_id, version) = match existing_group {
            Some(group) => (group, next_version(group_versions(store, group))),
            None => (id, 1),
        };

        let record = DocumentRecord {
            id,
            name: input.name.clone(),
            url: groundwork_core::document::UNRESOLVED_URL.to_string(),
            project_id: input.project_id,
            status: DocumentStatus::Uploading,
            uploaded_at: Utc::now(),
            category: input.category,
            indexed_content: String::new(),
            version,
            document_group_id,
            creator_id,
        };
        store.documents.push_front(record.clone());
        Ok(hydrate(store, record))
    }

    pub fn find_by_id(store: &Store, id: DbId) -> Option<Document> {
        store.documents.get(id).cloned().map(|r| hydrate(store, r))
    }

    pub fn require(store: &Store, id: DbId) -> Result<Document, CoreError> {
        Self::find_by_id(store, id).ok_or_else(|| CoreError::not_found(ENTITY, id))
    }

    /// Guard for the chunked upload: the document must still be uploading.
    pub fn require_uploading(store: &Store, id: DbId) -> Result<DocumentRecord, CoreError> {
        let record = store.documents.require(ENTITY, id)?;
        ensure_uploading(record.status)?;
        Ok(record.clone())
    }

    /// Delete a document whose upload was abandoned.
    pub fn abort_upload(store: &mut Store, id: DbId) -> Result<DocumentRecord, CoreError> {
        Self::require_uploading(store, id)?;
        store.document_links.remove_node(id);
        store
            .documents
            .remove(id)
            .ok_or_else(|| CoreError::not_found(ENTITY, id))
    }

    /// `Uploading -> Scanning`.
    pub fn begin_scan(store: &mut Store, id: DbId) -> Result<DocumentRecord, CoreError> {
        let record = store.documents.require_mut(ENTITY, id)?;
        ensure_uploading(record.status)?;
        record.status = DocumentStatus::Scanning;
        Ok(record.clone())
    }

    /// `Scanning -> Approved | Quarantined`.
    pub fn complete_scan(
        store: &mut Store,
        id: DbId,
        outcome: ScanOutcome,
    ) -> Result<Document, CoreError> {
        let record = store.documents.require_mut(ENTITY, id)?;
        if record.status != DocumentStatus::Scanning {
            return Err(CoreError::Conflict(format!(
                "Document is {} and not being scanned",
                record.status.label()
            )));
        }
        match outcome {
            ScanOutcome::Approved { indexed_content } => {
                record.status = DocumentStatus::Approved;
                record.indexed_content = indexed_content;
                record.url = resolve_access_url(&record.name).to_string();
            }
            ScanOutcome::Quarantined => {
                record.status = DocumentStatus::Quarantined;
                record.indexed_content = QUARANTINE_NOTICE.to_string();
            }
        }
        let record = record.clone();
        Ok(hydrate(store, record))
    }

    /// Clone an old version into a new, approved top version.
    ///
    /// The old record is left untouched. The new version inherits the old
    /// version's links. Returns the new document and the reverted version
    /// number.
    pub fn revert_to_version(store: &mut Store, id: DbId) -> Result<(Document, i32), CoreError> {
        let old = store.documents.require(ENTITY, id)?.clone();
        let new_id = store.documents.allocate_id();
        let record = DocumentRecord {
            id: new_id,
            version: next_version(group_versions(store, old.document_group_id)),
            uploaded_at: Utc::now(),
            status: DocumentStatus::Approved,
            ..old.clone()
        };
        for peer in store.document_links.neighbors(old.id) {
            store.document_links.add_edge(new_id, peer);
        }
        store.documents.push_front(record.clone());
        Ok((hydrate(store, record), old.version))
    }

    /// Link two documents symmetrically. Idempotent.
    pub fn link(
        store: &mut Store,
        source_id: DbId,
        target_id: DbId,
    ) -> Result<(DocumentRecord, DocumentRecord), CoreError> {
        ensure_distinct(source_id, target_id)?;
        let pair = Self::require_pair(store, source_id, target_id)?;
        store.document_links.add_edge(source_id, target_id);
        Ok(pair)
    }

    /// Remove a link in both directions. A missing link is a no-op.
    pub fn unlink(
        store: &mut Store,
        source_id: DbId,
        target_id: DbId,
    ) -> Result<(DocumentRecord, DocumentRecord), CoreError> {
        let pair = Self::require_pair(store, source_id, target_id)?;
        store.document_links.remove_edge(source_id, target_id);
        Ok(pair)
    }

    /// Documents of a project, newest upload first.
    pub fn list_by_project(store: &Store, project_id: DbId) -> Vec<Document> {
        let mut docs = list_where(store, |d| d.project_id == project_id);
        docs.sort_by(|a, b| b.record.uploaded_at.cmp(&a.record.uploaded_at));
        docs
    }

    pub fn list_by_company(store: &Store, company_id: DbId) -> Vec<Document> {
        let project_ids = ProjectRepo::ids_for_company(store, company_id);
        list_where(store, |d| project_ids.contains(&d.project_id))
    }

    pub fn list_by_projects(store: &Store, project_ids: &[DbId]) -> Vec<Document> {
        let project_ids: HashSet<DbId> = project_ids.iter().copied().collect();
        list_where(store, |d| project_ids.contains(&d.project_id))
    }

    /// Every version of a lineage, highest version first.
    pub fn history(store: &Store, document_group_id: DbId) -> Result<VersionHistory, CoreError> {
        let mut versions = list_where(store, |d| d.document_group_id == document_group_id);
        versions.sort_by(|a, b| b.record.version.cmp(&a.record.version));
        let latest = versions
            .first()
            .cloned()
            .ok_or_else(|| CoreError::not_found("DocumentGroup", document_group_id))?;
        Ok(VersionHistory {
            document_group_id,
            latest,
            versions,
        })
    }

    /// Approved documents of the same project not yet linked to `id`.
    pub fn link_candidates(store: &Store, id: DbId) -> Result<(Document, Vec<Document>), CoreError> {
        let source = Self::require(store, id)?;
        let linked: HashSet<DbId> = source.related_document_ids.iter().copied().collect();
        let candidates = list_where(store, |d| {
            d.id != id
                && d.project_id == source.record.project_id
                && d.status == DocumentStatus::Approved
                && !linked.contains(&d.id)
        });
        Ok((source, candidates))
    }

    /// Approved, indexed documents of the given projects.
    pub fn searchable(store: &Store, project_ids: &[DbId]) -> Vec<DocumentRecord> {
        let project_ids: HashSet<DbId> = project_ids.iter().copied().collect();
        store
            .documents
            .iter()
            .filter(|d| {
                project_ids.contains(&d.project_id)
                    && d.status == DocumentStatus::Approved
                    && !d.indexed_content.is_empty()
            })
            .cloned()
            .collect()
    }

    fn require_pair(
        store: &Store,
        source_id: DbId,
        target_id: DbId,
    ) -> Result<(DocumentRecord, DocumentRecord), CoreError> {
        let source = store.documents.require(ENTITY, source_id)?.clone();
        let target = store.documents.require(ENTITY, target_id)?.clone();
        Ok((source, target))
    }
}

fn hydrate(store: &Store, record: DocumentRecord) -> Document {
    let related_document_ids = store.document_links.neighbors(record.id);
    Document {
        record,
        related_document_ids,
    }
}

fn group_versions(store: &Store, group: DbId) -> Vec<i32> {
    store
        .documents
        .iter()
        .filter(|d| d.document_group_id == group)
        .map(|d| d.version)
        .collect()
}

fn list_where(store: &Store, predicate: impl Fn(&DocumentRecord) -> bool) -> Vec<Document> {
    store
        .documents
        .iter()
        .filter(|d| predicate(d))
        .cloned()
        .map(|r| hydrate(store, r))
        .collect()
}

// ---------------------------------------------------------------------------
// AcknowledgementRepo
// ---------------------------------------------------------------------------

pub struct AcknowledgementRepo;

impl AcknowledgementRepo {
    /// Record that a user has read a document. Each user acknowledges a
    /// document once.
    pub fn acknowledge(
        store: &mut Store,
        user_id: DbId,
        document_id: DbId,
    ) -> Result<(DocumentAcknowledgement, DocumentRecord), CoreError> {
        store.users.require("User", user_id)?;
        let document = store.documents.require(ENTITY, document_id)?.clone();
        let already = store
            .acknowledgements
            .iter()
            .any(|a| a.user_id == user_id && a.document_id == document_id);
        if already {
            return Err(CoreError::Conflict("Document already acknowledged.".into()));
        }
        let ack = DocumentAcknowledgement {
            id: store.acknowledgements.allocate_id(),
            user_id,
            document_id,
            acknowledged_at: Utc::now(),
        };
        store.acknowledgements.push_back(ack.clone());
        Ok((ack, document))
    }

    /// Acknowledgements of any document in the project.
    pub fn list_by_project(store: &Store, project_id: DbId) -> Vec<DocumentAcknowledgement> {
        let doc_ids: HashSet<DbId> = store
            .documents
            .iter()
            .filter(|d| d.project_id == project_id)
            .map(|d| d.id)
            .collect();
        store
            .acknowledgements
            .iter()
            .filter(|a| doc_ids.contains(&a.document_id))
            .cloned()
            .collect()
    }

    pub fn list_by_user(store: &Store, user_id: DbId) -> Vec<DocumentAcknowledgement> {
        store
            .acknowledgements
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect()
    }
}
