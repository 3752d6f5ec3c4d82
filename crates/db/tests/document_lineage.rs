//! Document upload lifecycle, version lineage and links.
//!
//! Exercises `DocumentRepo` and `AcknowledgementRepo` against the demo store:
//! - Re-uploading a name extends its lineage with consecutive versions
//! - Reverting clones an old version into a new approved top version
//! - Links are symmetric and survive a revert
//! - The scan step only runs on an uploading document

use assert_matches::assert_matches;
use groundwork_core::document::{
    resolve_access_url, DocumentCategory, DocumentStatus, QUARANTINE_NOTICE,
};
use groundwork_core::error::CoreError;
use groundwork_db::models::document::{InitiateUpload, ScanOutcome};
use groundwork_db::repositories::{AcknowledgementRepo, DocumentRepo};
use groundwork_db::{seed, Store};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn demo_store() -> Store {
    let mut store = Store::default();
    seed::load_demo_data(&mut store);
    store
}

fn upload(name: &str, project_id: i64) -> InitiateUpload {
    InitiateUpload {
        name: name.to_string(),
        project_id,
        category: DocumentCategory::General,
    }
}

fn approve(store: &mut Store, id: i64) {
    DocumentRepo::begin_scan(store, id).unwrap();
    DocumentRepo::complete_scan(
        store,
        id,
        ScanOutcome::Approved {
            indexed_content: "Pour sequence for level 1.".into(),
        },
    )
    .unwrap();
}

// ---------------------------------------------------------------------------
// Lineage
// ---------------------------------------------------------------------------

#[test]
fn repeated_uploads_extend_one_lineage() {
    let mut store = demo_store();
    let first = DocumentRepo::initiate_upload(&mut store, &upload("Pour Plan.pdf", 1), 2).unwrap();
    let second = DocumentRepo::initiate_upload(&mut store, &upload("Pour Plan.pdf", 1), 2).unwrap();
    let third = DocumentRepo::initiate_upload(&mut store, &upload("Pour Plan.pdf", 1), 7).unwrap();

    assert_eq!(first.record.document_group_id, first.record.id);
    assert_eq!(second.record.document_group_id, first.record.id);
    assert_eq!(third.record.document_group_id, first.record.id);
    assert_eq!(
        [first.record.version, second.record.version, third.record.version],
        [1, 2, 3]
    );
    assert_eq!(third.record.status, DocumentStatus::Uploading);
}

#[test]
fn same_name_in_another_project_starts_a_new_lineage() {
    let mut store = demo_store();
    let doc = DocumentRepo::initiate_upload(&mut store, &upload("Safety Manual v1.2.pdf", 2), 6)
        .unwrap();
    assert_eq!(doc.record.version, 1);
    assert_eq!(doc.record.document_group_id, doc.record.id);
}

#[test]
fn revert_creates_new_top_version_and_keeps_the_old_one() {
    let mut store = demo_store();
    let (reverted, from_version) = DocumentRepo::revert_to_version(&mut store, 7).unwrap();

    assert_eq!(from_version, 1);
    assert_eq!(reverted.record.version, 4);
    assert_eq!(reverted.record.document_group_id, 2);
    assert_eq!(reverted.record.status, DocumentStatus::Approved);
    assert_eq!(reverted.record.indexed_content, "Initial draft of blueprints.");

    let old = DocumentRepo::require(&store, 7).unwrap();
    assert_eq!(old.record.version, 1);

    let history = DocumentRepo::history(&store, 2).unwrap();
    let versions: Vec<i32> = history.versions.iter().map(|d| d.record.version).collect();
    assert_eq!(versions, vec![4, 3, 2, 1]);
    assert_eq!(history.latest.record.id, reverted.record.id);
}

#[test]
fn revert_of_unknown_document_is_not_found() {
    let mut store = demo_store();
    assert_matches!(
        DocumentRepo::revert_to_version(&mut store, 999),
        Err(CoreError::NotFound { entity: "Document", id: 999 })
    );
}

#[test]
fn history_of_unknown_group_is_not_found() {
    let store = demo_store();
    assert_matches!(
        DocumentRepo::history(&store, 404),
        Err(CoreError::NotFound { .. })
    );
}

// ---------------------------------------------------------------------------
// Links
// ---------------------------------------------------------------------------

#[test]
fn seeded_link_is_visible_from_both_sides() {
    let store = demo_store();
    assert_eq!(DocumentRepo::require(&store, 1).unwrap().related_document_ids, vec![4]);
    assert_eq!(DocumentRepo::require(&store, 4).unwrap().related_document_ids, vec![1]);
}

#[test]
fn link_then_unlink_round_trips() {
    let mut store = demo_store();
    DocumentRepo::link(&mut store, 2, 3).unwrap();
    assert!(DocumentRepo::require(&store, 2).unwrap().related_document_ids.contains(&3));
    assert!(DocumentRepo::require(&store, 3).unwrap().related_document_ids.contains(&2));

    DocumentRepo::unlink(&mut store, 3, 2).unwrap();
    assert!(DocumentRepo::require(&store, 2).unwrap().related_document_ids.is_empty());
    assert!(DocumentRepo::require(&store, 3).unwrap().related_document_ids.is_empty());
}

#[test]
fn linking_twice_keeps_a_single_edge() {
    let mut store = demo_store();
    DocumentRepo::link(&mut store, 1, 4).unwrap();
    assert_eq!(store.document_links.edge_count(), 1);
}

#[test]
fn self_link_is_rejected() {
    let mut store = demo_store();
    assert_matches!(
        DocumentRepo::link(&mut store, 2, 2),
        Err(CoreError::Validation(_))
    );
}

#[test]
fn revert_inherits_links() {
    let mut store = demo_store();
    let (reverted, _) = DocumentRepo::revert_to_version(&mut store, 1).unwrap();
    assert_eq!(reverted.related_document_ids, vec![4]);
    let peer = DocumentRepo::require(&store, 4).unwrap();
    assert!(peer.related_document_ids.contains(&reverted.record.id));
}

#[test]
fn link_candidates_exclude_linked_and_unapproved_documents() {
    let store = demo_store();
    let (_, candidates) = DocumentRepo::link_candidates(&store, 1).unwrap();
    let ids: Vec<i64> = candidates.iter().map(|d| d.record.id).collect();
    assert!(!ids.contains(&1));
    assert!(!ids.contains(&5), "quarantined version is not a candidate");
    assert!(!ids.contains(&4), "already linked and in another project");
    assert!(ids.contains(&2));
}

// ---------------------------------------------------------------------------
// Upload lifecycle
// ---------------------------------------------------------------------------

#[test]
fn approved_scan_indexes_and_resolves_url() {
    let mut store = demo_store();
    let doc = DocumentRepo::initiate_upload(&mut store, &upload("Pour Plan.pdf", 1), 2).unwrap();
    approve(&mut store, doc.record.id);

    let done = DocumentRepo::require(&store, doc.record.id).unwrap();
    assert_eq!(done.record.status, DocumentStatus::Approved);
    assert_eq!(done.record.url, resolve_access_url("Pour Plan.pdf"));
    assert_eq!(done.record.indexed_content, "Pour sequence for level 1.");
}

#[test]
fn quarantined_scan_records_notice() {
    let mut store = demo_store();
    let doc = DocumentRepo::initiate_upload(&mut store, &upload("invoice.exe", 1), 3).unwrap();
    DocumentRepo::begin_scan(&mut store, doc.record.id).unwrap();
    let done = DocumentRepo::complete_scan(&mut store, doc.record.id, ScanOutcome::Quarantined)
        .unwrap();
    assert_eq!(done.record.status, DocumentStatus::Quarantined);
    assert_eq!(done.record.indexed_content, QUARANTINE_NOTICE);
}

#[test]
fn scan_requires_the_right_state() {
    let mut store = demo_store();
    let doc = DocumentRepo::initiate_upload(&mut store, &upload("Pour Plan.pdf", 1), 2).unwrap();
    assert_matches!(
        DocumentRepo::complete_scan(&mut store, doc.record.id, ScanOutcome::Quarantined),
        Err(CoreError::Conflict(_))
    );
    approve(&mut store, doc.record.id);
    assert_matches!(
        DocumentRepo::begin_scan(&mut store, doc.record.id),
        Err(CoreError::Conflict(_))
    );
}

#[test]
fn aborted_upload_disappears() {
    let mut store = demo_store();
    let doc = DocumentRepo::initiate_upload(&mut store, &upload("Pour Plan.pdf", 1), 2).unwrap();
    DocumentRepo::abort_upload(&mut store, doc.record.id).unwrap();
    assert!(DocumentRepo::find_by_id(&store, doc.record.id).is_none());
}

#[test]
fn upload_to_unknown_project_is_rejected() {
    let mut store = demo_store();
    assert_matches!(
        DocumentRepo::initiate_upload(&mut store, &upload("x.pdf", 42), 2),
        Err(CoreError::NotFound { entity: "Project", .. })
    );
}

// ---------------------------------------------------------------------------
// Acknowledgements
// ---------------------------------------------------------------------------

#[test]
fn acknowledging_twice_conflicts() {
    let mut store = demo_store();
    assert_matches!(
        AcknowledgementRepo::acknowledge(&mut store, 3, 1),
        Err(CoreError::Conflict(msg)) if msg == "Document already acknowledged."
    );
    let (ack, doc) = AcknowledgementRepo::acknowledge(&mut store, 4, 1).unwrap();
    assert_eq!(ack.user_id, 4);
    assert_eq!(doc.name, "Safety Manual v1.2.pdf");
    assert_eq!(AcknowledgementRepo::list_by_project(&store, 1).len(), 2);
}
