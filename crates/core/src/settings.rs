//! Company settings and partial-update merging.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
}

/// Per-company notification switches. Unset fields keep the product default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_due_date: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_document_assigned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timesheet_flagged: Option<bool>,
}

impl NotificationPreferences {
    /// Overlay the fields set in `patch`, keeping the rest.
    pub fn merge(&mut self, patch: &NotificationPreferences) {
        if patch.task_due_date.is_some() {
            self.task_due_date = patch.task_due_date;
        }
        if patch.new_document_assigned.is_some() {
            self.new_document_assigned = patch.new_document_assigned;
        }
        if patch.timesheet_flagged.is_some() {
            self.timesheet_flagged = patch.timesheet_flagged;
        }
    }
}

pub fn validate_retention_days(days: i32) -> Result<(), CoreError> {
    if days <= 0 {
        return Err(CoreError::Validation(
            "Timesheet retention must be a positive number of days".into(),
        ));
    }
    Ok(())
}
