use groundwork_core::settings::{NotificationPreferences, Theme};
use groundwork_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::Record;

#[derive(Debug, Clone, Serialize)]
pub struct Company {
    pub id: DbId,
    pub name: String,
}

impl Record for Company {
    fn id(&self) -> DbId {
        self.id
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanySettings {
    pub id: DbId,
    pub company_id: DbId,
    pub timesheet_retention_days: i32,
    pub theme: Option<Theme>,
    pub notification_preferences: NotificationPreferences,
}

impl Record for CompanySettings {
    fn id(&self) -> DbId {
        self.id
    }
}

/// Partial settings update. Notification preferences are merged field by
/// field rather than replaced.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCompanySettings {
    pub timesheet_retention_days: Option<i32>,
    pub theme: Option<Theme>,
    pub notification_preferences: Option<NotificationPreferences>,
}
