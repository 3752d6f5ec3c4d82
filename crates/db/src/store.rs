use std::collections::VecDeque;
use std::sync::Arc;

use groundwork_core::error::CoreError;
use groundwork_core::links::LinkGraph;
use groundwork_core::types::DbId;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::audit::AuditLog;
use crate::models::company::{Company, CompanySettings};
use crate::models::daily_log::DailyLog;
use crate::models::document::{DocumentAcknowledgement, DocumentRecord};
use crate::models::equipment::{Equipment, ResourceAssignment};
use crate::models::project::{ProjectAssignment, ProjectRow};
use crate::models::rfi::Rfi;
use crate::models::safety::SafetyIncident;
use crate::models::site::Site;
use crate::models::timesheet::Timesheet;
use crate::models::todo::Todo;
use crate::models::user::User;

/// A row with a stable numeric id.
pub trait Record {
    fn id(&self) -> DbId;
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Ordered collection of rows with monotonically assigned ids.
///
/// Row order is the canonical listing order: `push_front` is used where the
/// newest row must be read first (documents, incidents, audit entries).
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: VecDeque<T>,
    next_id: DbId,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: VecDeque::new(),
            next_id: 1,
        }
    }
}

impl<T: Record> Table<T> {
    /// Reserve the next id. Ids are never reused, even after deletes.
    pub fn allocate_id(&mut self) -> DbId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn push_back(&mut self, row: T) {
        self.observe(row.id());
        self.rows.push_back(row);
    }

    pub fn push_front(&mut self, row: T) {
        self.observe(row.id());
        self.rows.push_front(row);
    }

    pub fn get(&self, id: DbId) -> Option<&T> {
        self.rows.iter().find(|r| r.id() == id)
    }

    pub fn get_mut(&mut self, id: DbId) -> Option<&mut T> {
        self.rows.iter_mut().find(|r| r.id() == id)
    }

    /// Like [`get`](Self::get) but maps a miss to `CoreError::NotFound`.
    pub fn require(&self, entity: &'static str, id: DbId) -> Result<&T, CoreError> {
        self.get(id).ok_or_else(|| CoreError::not_found(entity, id))
    }

    pub fn require_mut(&mut self, entity: &'static str, id: DbId) -> Result<&mut T, CoreError> {
        self.get_mut(id).ok_or_else(|| CoreError::not_found(entity, id))
    }

    pub fn remove(&mut self, id: DbId) -> Option<T> {
        let index = self.rows.iter().position(|r| r.id() == id)?;
        self.rows.remove(index)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn front(&self) -> Option<&T> {
        self.rows.front()
    }

    fn observe(&mut self, id: DbId) {
        if id >= self.next_id {
            self.next_id = id + 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Every collection the application owns.
#[derive(Debug, Default)]
pub struct Store {
    pub companies: Table<Company>,
    pub company_settings: Table<CompanySettings>,
    pub users: Table<User>,
    pub sites: Table<Site>,
    pub projects: Table<ProjectRow>,
    pub assignments: Vec<ProjectAssignment>,
    pub timesheets: Table<Timesheet>,
    pub documents: Table<DocumentRecord>,
    pub document_links: LinkGraph,
    pub acknowledgements: Table<DocumentAcknowledgement>,
    pub todos: Table<Todo>,
    pub safety_incidents: Table<SafetyIncident>,
    pub daily_logs: Table<DailyLog>,
    pub rfis: Table<Rfi>,
    pub equipment: Table<Equipment>,
    pub resource_assignments: Table<ResourceAssignment>,
    pub audit_logs: Table<AuditLog>,
    /// Shared sequence for sub-task and comment ids.
    child_sequence: DbId,
}

impl Store {
    /// Next id for an embedded child row (sub-task, comment).
    pub fn next_child_id(&mut self) -> DbId {
        self.child_sequence += 1;
        self.child_sequence
    }

    /// Make sure seeded child ids are never handed out again.
    pub(crate) fn observe_child_id(&mut self, id: DbId) {
        self.child_sequence = self.child_sequence.max(id);
    }
}

// ---------------------------------------------------------------------------
// Database handle
// ---------------------------------------------------------------------------

/// Cloneable handle to the shared store.
///
/// Callers must not hold a guard across an `.await` on an external
/// collaborator.
#[derive(Debug, Clone, Default)]
pub struct Database {
    inner: Arc<RwLock<Store>>,
}

impl Database {
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Store> {
        self.inner.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, Store> {
        self.inner.write().await
    }
}
