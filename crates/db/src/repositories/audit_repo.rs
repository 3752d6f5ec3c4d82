//! Append-only audit log with a SHA-256 hash chain.

use std::collections::HashSet;

use chrono::Utc;
use groundwork_core::audit::{canonical_entry_data, compute_integrity_hash};
use groundwork_core::types::{DbId, Timestamp};

use crate::models::audit::{AuditLog, IntegrityCheckResult, NewAuditEntry};
use crate::Store;

/// Default number of entries in a company activity feed.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

pub struct AuditRepo;

impl AuditRepo {
    /// Append an entry timestamped now. Always succeeds.
    pub fn append(store: &mut Store, entry: NewAuditEntry) -> AuditLog {
        Self::append_at(store, entry, Utc::now())
    }

    /// Append an entry with an explicit timestamp (used by seeding).
    ///
    /// The new entry becomes the head of the log and its hash chains to the
    /// previous head.
    pub fn append_at(store: &mut Store, entry: NewAuditEntry, timestamp: Timestamp) -> AuditLog {
        let id = store.audit_logs.allocate_id();
        let prev_hash = store.audit_logs.front().map(|e| e.integrity_hash.clone());
        let data = canonical_entry_data(
            id,
            entry.project_id,
            entry.actor_id,
            entry.action,
            entry.target.as_ref(),
            timestamp,
        );
        let log = AuditLog {
            id,
            project_id: entry.project_id,
            actor_id: entry.actor_id,
            action: entry.action,
            target: entry.target,
            timestamp,
            integrity_hash: compute_integrity_hash(prev_hash.as_deref(), &data),
        };
        store.audit_logs.push_front(log.clone());
        log
    }

    /// Entries for one project, newest first.
    pub fn list_by_project(store: &Store, project_id: DbId) -> Vec<AuditLog> {
        newest_first(
            store
                .audit_logs
                .iter()
                .filter(|e| e.project_id == Some(project_id))
                .cloned()
                .collect(),
        )
    }

    /// Latest entries whose project belongs to the company.
    pub fn recent_for_company(store: &Store, company_id: DbId, limit: usize) -> Vec<AuditLog> {
        let project_ids: HashSet<DbId> = store
            .projects
            .iter()
            .filter(|p| p.company_id == company_id)
            .map(|p| p.id)
            .collect();
        let mut entries = newest_first(
            store
                .audit_logs
                .iter()
                .filter(|e| e.project_id.is_some_and(|p| project_ids.contains(&p)))
                .cloned()
                .collect(),
        );
        entries.truncate(limit);
        entries
    }

    /// Walk the chain oldest to newest and report the first broken link.
    pub fn verify_chain(store: &Store) -> IntegrityCheckResult {
        let mut prev: Option<&str> = None;
        let mut verified = 0;

        for entry in store.audit_logs.iter().rev() {
            let data = canonical_entry_data(
                entry.id,
                entry.project_id,
                entry.actor_id,
                entry.action,
                entry.target.as_ref(),
                entry.timestamp,
            );
            if compute_integrity_hash(prev, &data) != entry.integrity_hash {
                return IntegrityCheckResult {
                    verified_entries: verified,
                    chain_valid: false,
                    first_break: Some(entry.id),
                };
            }
            verified += 1;
            prev = Some(&entry.integrity_hash);
        }

        IntegrityCheckResult {
            verified_entries: verified,
            chain_valid: true,
            first_break: None,
        }
    }
}

/// Sort newest first; later ids win ties.
fn newest_first(mut entries: Vec<AuditLog>) -> Vec<AuditLog> {
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
    entries
}
