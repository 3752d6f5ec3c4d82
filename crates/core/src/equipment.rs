//! Equipment and resource scheduling rules.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentKind {
    Heavy,
    Light,
    PowerTool,
    Vehicle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    Available,
    InUse,
    Maintenance,
}

impl EquipmentStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::InUse => "In Use",
            Self::Maintenance => "Maintenance",
        }
    }
}

/// What a scheduled resource assignment refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    User,
    Equipment,
}

impl ResourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Equipment => "equipment",
        }
    }
}

/// A scheduled window must not end before it starts.
pub fn validate_window(start: Timestamp, end: Timestamp) -> Result<(), CoreError> {
    if end < start {
        return Err(CoreError::Validation(
            "Assignment end date must not be before its start date".into(),
        ));
    }
    Ok(())
}
