use groundwork_core::equipment::{EquipmentKind, EquipmentStatus, ResourceType};
use groundwork_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::Record;

#[derive(Debug, Clone, Serialize)]
pub struct Equipment {
    pub id: DbId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EquipmentKind,
    pub status: EquipmentStatus,
    pub company_id: DbId,
    /// Project the item is currently assigned to.
    pub project_id: Option<DbId>,
}

impl Record for Equipment {
    fn id(&self) -> DbId {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignEquipment {
    pub project_id: DbId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEquipmentStatus {
    pub status: EquipmentStatus,
}

/// A scheduled window for a person or piece of equipment on a project.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceAssignment {
    pub id: DbId,
    pub resource_id: DbId,
    pub resource_type: ResourceType,
    pub project_id: DbId,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
}

impl Record for ResourceAssignment {
    fn id(&self) -> DbId {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateResourceAssignment {
    pub resource_id: DbId,
    pub resource_type: ResourceType,
    pub project_id: DbId,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
}
