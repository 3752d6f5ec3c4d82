//! Recording audit entries from handlers.
//!
//! Handlers call [`record`] while still holding the write guard used for the
//! mutation, so the entry and the change land together.

use groundwork_core::audit::{AuditAction, AuditTarget, TargetKind};
use groundwork_core::types::DbId;
use groundwork_db::models::audit::{AuditLog, NewAuditEntry};
use groundwork_db::repositories::AuditRepo;
use groundwork_db::Store;

/// Append an entry to the hash-chained log.
pub fn record(
    store: &mut Store,
    project_id: Option<DbId>,
    actor_id: DbId,
    action: impl Into<AuditAction>,
    target: AuditTarget,
) -> AuditLog {
    let action = action.into();
    let entry = AuditRepo::append(
        store,
        NewAuditEntry {
            project_id,
            actor_id,
            action,
            target: Some(target),
        },
    );
    tracing::debug!(
        audit_id = entry.id,
        action = %action,
        actor_id,
        project_id = ?project_id,
        "Audit entry recorded",
    );
    entry
}

/// Shorthand for building a target.
pub fn target(kind: TargetKind, id: DbId, name: impl Into<String>) -> AuditTarget {
    AuditTarget::new(kind, id, name)
}
