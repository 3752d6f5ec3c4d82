//! Projects (always read enriched from their site) and user assignments.

use std::collections::HashSet;

use chrono::Utc;
use groundwork_core::error::CoreError;
use groundwork_core::types::DbId;

use crate::models::project::{CreateProject, Project, ProjectAssignment, ProjectRow};
use crate::models::user::User;
use crate::Store;

// ---------------------------------------------------------------------------
// ProjectRepo
// ---------------------------------------------------------------------------

pub struct ProjectRepo;

impl ProjectRepo {
    /// Find a project. Projects whose site is missing are treated as absent.
    pub fn find_by_id(store: &Store, id: DbId) -> Option<Project> {
        store.projects.get(id).and_then(|row| enrich(store, row))
    }

    pub fn require(store: &Store, id: DbId) -> Result<Project, CoreError> {
        Self::find_by_id(store, id).ok_or_else(|| CoreError::not_found("Project", id))
    }

    pub fn create(store: &mut Store, input: &CreateProject) -> Result<Project, CoreError> {
        if input.name.trim().is_empty() {
            return Err(CoreError::Validation("Project name must not be empty".into()));
        }
        store.sites.require("Site", input.site_id)?;
        store.companies.require("Company", input.company_id)?;
        store.users.require("User", input.manager_id)?;

        let row = ProjectRow {
            id: store.projects.allocate_id(),
            name: input.name.trim().to_string(),
            site_id: input.site_id,
            company_id: input.company_id,
            manager_id: input.manager_id,
            created_at: Utc::now(),
        };
        let id = row.id;
        store.projects.push_back(row);
        Self::require(store, id)
    }

    pub fn list_by_company(store: &Store, company_id: DbId) -> Vec<Project> {
        list_where(store, |p| p.company_id == company_id)
    }

    pub fn list_by_manager(store: &Store, manager_id: DbId) -> Vec<Project> {
        list_where(store, |p| p.manager_id == manager_id)
    }

    pub fn list_by_user(store: &Store, user_id: DbId) -> Vec<Project> {
        let ids: HashSet<DbId> = store
            .assignments
            .iter()
            .filter(|a| a.user_id == user_id)
            .map(|a| a.project_id)
            .collect();
        list_where(store, |p| ids.contains(&p.id))
    }

    /// Ids of every project owned by the company, including ones whose site
    /// is missing.
    pub fn ids_for_company(store: &Store, company_id: DbId) -> HashSet<DbId> {
        store
            .projects
            .iter()
            .filter(|p| p.company_id == company_id)
            .map(|p| p.id)
            .collect()
    }

    /// Change the manager. Returns the audit description
    /// (`"from X to Y"`) only when the manager actually changed.
    pub fn update_manager(
        store: &mut Store,
        id: DbId,
        manager_id: DbId,
    ) -> Result<(Project, Option<String>), CoreError> {
        let new_manager = store.users.require("User", manager_id)?.name.clone();
        let row = store.projects.require_mut("Project", id)?;
        let change = if row.manager_id != manager_id {
            let old_manager_id = row.manager_id;
            row.manager_id = manager_id;
            let old_manager = store
                .users
                .get(old_manager_id)
                .map(|u| u.name.as_str())
                .unwrap_or("Unassigned");
            Some(format!("from {old_manager} to {new_manager}"))
        } else {
            None
        };
        Ok((Self::require(store, id)?, change))
    }
}

fn enrich(store: &Store, row: &ProjectRow) -> Option<Project> {
    store.sites.get(row.site_id).map(|site| Project::enrich(row, site))
}

fn list_where(store: &Store, predicate: impl Fn(&ProjectRow) -> bool) -> Vec<Project> {
    store
        .projects
        .iter()
        .filter(|p| predicate(p))
        .filter_map(|p| enrich(store, p))
        .collect()
}

// ---------------------------------------------------------------------------
// AssignmentRepo
// ---------------------------------------------------------------------------

pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Assign a user to a project. Returns `false` when already assigned.
    pub fn assign(store: &mut Store, user_id: DbId, project_id: DbId) -> Result<(User, bool), CoreError> {
        let user = store.users.require("User", user_id)?.clone();
        ProjectRepo::require(store, project_id)?;
        if Self::is_member(store, user_id, project_id) {
            return Ok((user, false));
        }
        store.assignments.push(ProjectAssignment { user_id, project_id });
        Ok((user, true))
    }

    /// Remove an assignment. Returns `false` when there was none.
    pub fn unassign(store: &mut Store, user_id: DbId, project_id: DbId) -> Result<(User, bool), CoreError> {
        let user = store.users.require("User", user_id)?.clone();
        let before = store.assignments.len();
        store
            .assignments
            .retain(|a| !(a.user_id == user_id && a.project_id == project_id));
        Ok((user, store.assignments.len() != before))
    }

    pub fn is_member(store: &Store, user_id: DbId, project_id: DbId) -> bool {
        store
            .assignments
            .iter()
            .any(|a| a.user_id == user_id && a.project_id == project_id)
    }

    pub fn member_ids(store: &Store, project_id: DbId) -> HashSet<DbId> {
        store
            .assignments
            .iter()
            .filter(|a| a.project_id == project_id)
            .map(|a| a.user_id)
            .collect()
    }
}
