//! Audit log entity models.
//!
//! Entries are immutable once appended and carry a hash chained to the
//! previous entry.

use groundwork_core::audit::{AuditAction, AuditTarget};
use groundwork_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::Record;

// ---------------------------------------------------------------------------
// Audit log entity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct AuditLog {
    pub id: DbId,
    pub project_id: Option<DbId>,
    pub actor_id: DbId,
    pub action: AuditAction,
    pub target: Option<AuditTarget>,
    pub timestamp: Timestamp,
    pub integrity_hash: String,
}

impl AuditLog {
    pub fn view(&self) -> AuditLogView {
        AuditLogView {
            entry: self.clone(),
            code: self.action.code(),
            label: self.action.label(),
            category: self.action.category(),
        }
    }
}

impl Record for AuditLog {
    fn id(&self) -> DbId {
        self.id
    }
}

/// Audit entry with its display code, label and retention category.
#[derive(Debug, Clone, Serialize)]
pub struct AuditLogView {
    #[serde(flatten)]
    pub entry: AuditLog,
    pub code: &'static str,
    pub label: &'static str,
    pub category: &'static str,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct NewAuditEntry {
    pub project_id: Option<DbId>,
    pub actor_id: DbId,
    pub action: AuditAction,
    pub target: Option<AuditTarget>,
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentActivityQuery {
    pub limit: Option<usize>,
}

// ---------------------------------------------------------------------------
// Integrity check result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrityCheckResult {
    /// Number of entries verified.
    pub verified_entries: usize,
    /// Whether the entire chain is valid.
    pub chain_valid: bool,
    /// ID of the first entry where the chain breaks, if any.
    pub first_break: Option<DbId>,
}
