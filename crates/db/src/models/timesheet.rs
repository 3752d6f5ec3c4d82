use std::collections::BTreeMap;

use groundwork_core::geo::GeoPoint;
use groundwork_core::timesheet::{worked_minutes, Break, TimesheetStatus, WorkType};
use groundwork_core::trust::ReportedLocation;
use groundwork_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::Record;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// One shift. `clock_out == None` while the shift is active.
#[derive(Debug, Clone, Serialize)]
pub struct Timesheet {
    pub id: DbId,
    pub user_id: DbId,
    pub project_id: DbId,
    pub clock_in: Timestamp,
    pub clock_out: Option<Timestamp>,
    pub status: TimesheetStatus,
    pub location: Option<GeoPoint>,
    pub trust_score: f64,
    pub trust_reasons: BTreeMap<String, String>,
    pub breaks: Vec<Break>,
    pub work_type: WorkType,
    pub comment: String,
}

impl Timesheet {
    pub fn is_active(&self) -> bool {
        self.clock_out.is_none()
    }

    /// Attach derived fields for reads.
    pub fn view(self, now: Timestamp) -> TimesheetView {
        let worked_minutes = worked_minutes(self.clock_in, self.clock_out, &self.breaks, now);
        TimesheetView {
            timesheet: self,
            worked_minutes,
        }
    }
}

impl Record for Timesheet {
    fn id(&self) -> DbId {
        self.id
    }
}

/// Timesheet as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct TimesheetView {
    #[serde(flatten)]
    pub timesheet: Timesheet,
    pub worked_minutes: i64,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ClockIn {
    pub user_id: DbId,
    pub project_id: DbId,
    pub location: ReportedLocation,
    pub work_type: WorkType,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTimesheetStatus {
    pub status: TimesheetStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTimesheetDetails {
    pub comment: Option<String>,
    pub work_type: Option<WorkType>,
}
