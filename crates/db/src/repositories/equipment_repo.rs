//! Equipment fleet and the resource schedule.

use std::collections::HashSet;

use groundwork_core::equipment::{validate_window, EquipmentStatus, ResourceType};
use groundwork_core::error::CoreError;
use groundwork_core::types::DbId;

use crate::models::equipment::{CreateResourceAssignment, Equipment, ResourceAssignment};
use crate::repositories::ProjectRepo;
use crate::Store;

const ENTITY: &str = "Equipment";

// ---------------------------------------------------------------------------
// EquipmentRepo
// ---------------------------------------------------------------------------

pub struct EquipmentRepo;

impl EquipmentRepo {
    pub fn list_by_company(store: &Store, company_id: DbId) -> Vec<Equipment> {
        store
            .equipment
            .iter()
            .filter(|e| e.company_id == company_id)
            .cloned()
            .collect()
    }

    /// Put an item to work on a project (`InUse`).
    pub fn assign(store: &mut Store, id: DbId, project_id: DbId) -> Result<Equipment, CoreError> {
        store.projects.require("Project", project_id)?;
        let item = store.equipment.require_mut(ENTITY, id)?;
        item.project_id = Some(project_id);
        item.status = EquipmentStatus::InUse;
        Ok(item.clone())
    }

    /// Release an item from its project (`Available`). Returns the project
    /// it was released from.
    pub fn unassign(store: &mut Store, id: DbId) -> Result<(Equipment, DbId), CoreError> {
        let item = store.equipment.require_mut(ENTITY, id)?;
        let project_id = item.project_id.take().ok_or_else(|| {
            CoreError::Conflict(format!("Equipment '{}' is not assigned to a project", item.name))
        })?;
        item.status = EquipmentStatus::Available;
        Ok((item.clone(), project_id))
    }

    pub fn update_status(
        store: &mut Store,
        id: DbId,
        status: EquipmentStatus,
    ) -> Result<Equipment, CoreError> {
        let item = store.equipment.require_mut(ENTITY, id)?;
        item.status = status;
        Ok(item.clone())
    }
}

// ---------------------------------------------------------------------------
// ResourceRepo
// ---------------------------------------------------------------------------

pub struct ResourceRepo;

impl ResourceRepo {
    /// Scheduled windows on the company's projects.
    pub fn list_by_company(store: &Store, company_id: DbId) -> Vec<ResourceAssignment> {
        let project_ids: HashSet<DbId> = ProjectRepo::ids_for_company(store, company_id);
        store
            .resource_assignments
            .iter()
            .filter(|r| project_ids.contains(&r.project_id))
            .cloned()
            .collect()
    }

    pub fn create(
        store: &mut Store,
        input: &CreateResourceAssignment,
    ) -> Result<ResourceAssignment, CoreError> {
        validate_window(input.start_date, input.end_date)?;
        store.projects.require("Project", input.project_id)?;
        match input.resource_type {
            ResourceType::User => store.users.require("User", input.resource_id).map(|_| ())?,
            ResourceType::Equipment => store.equipment.require(ENTITY, input.resource_id).map(|_| ())?,
        }
        let assignment = ResourceAssignment {
            id: store.resource_assignments.allocate_id(),
            resource_id: input.resource_id,
            resource_type: input.resource_type,
            project_id: input.project_id,
            start_date: input.start_date,
            end_date: input.end_date,
        };
        store.resource_assignments.push_back(assignment.clone());
        Ok(assignment)
    }

    pub fn delete(store: &mut Store, id: DbId) -> Result<ResourceAssignment, CoreError> {
        store
            .resource_assignments
            .remove(id)
            .ok_or_else(|| CoreError::not_found("ResourceAssignment", id))
    }
}
