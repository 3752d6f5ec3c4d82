//! Timesheets: trust-scored clock-in, breaks, clock-out and review.

use std::collections::HashSet;

use chrono::Utc;
use groundwork_core::audit::TimesheetAction;
use groundwork_core::error::CoreError;
use groundwork_core::geo::validate_point;
use groundwork_core::timesheet::{self, TimesheetStatus};
use groundwork_core::trust::{assess_clock_in, TrustAssessment};
use groundwork_core::types::DbId;

use crate::models::timesheet::{ClockIn, Timesheet, UpdateTimesheetDetails};
use crate::repositories::ProjectRepo;
use crate::Store;

const ENTITY: &str = "Timesheet";

pub struct TimesheetRepo;

impl TimesheetRepo {
    /// Open a new shift for the user.
    ///
    /// Fails with `Conflict` when the user already has an active shift. An
    /// unknown or site-less project skips the geofence check.
    pub fn clock_in(
        store: &mut Store,
        input: &ClockIn,
    ) -> Result<(Timesheet, TrustAssessment), CoreError> {
        validate_point(&input.location.point())?;
        if !input.location.accuracy.is_finite() || input.location.accuracy < 0.0 {
            return Err(CoreError::Validation(
                "Location accuracy must be a non-negative number of metres".into(),
            ));
        }
        store.users.require("User", input.user_id)?;
        if let Some(active) = Self::find_active_for_user(store, input.user_id) {
            return Err(CoreError::Conflict(format!(
                "User already has an active timesheet ({})",
                active.id
            )));
        }

        let fence = ProjectRepo::find_by_id(store, input.project_id).map(|p| p.geofence());
        let assessment = assess_clock_in(&input.location, fence.as_ref());

        let sheet = Timesheet {
            id: store.timesheets.allocate_id(),
            user_id: input.user_id,
            project_id: input.project_id,
            clock_in: Utc::now(),
            clock_out: None,
            status: assessment.initial_status(),
            location: Some(input.location.point()),
            trust_score: assessment.score,
            trust_reasons: assessment.reasons.clone(),
            breaks: Vec::new(),
            work_type: input.work_type,
            comment: String::new(),
        };
        store.timesheets.push_back(sheet.clone());
        Ok((sheet, assessment))
    }

    pub fn find_by_id(store: &Store, id: DbId) -> Option<Timesheet> {
        store.timesheets.get(id).cloned()
    }

    pub fn require(store: &Store, id: DbId) -> Result<Timesheet, CoreError> {
        store.timesheets.require(ENTITY, id).cloned()
    }

    pub fn find_active_for_user(store: &Store, user_id: DbId) -> Option<&Timesheet> {
        store
            .timesheets
            .iter()
            .find(|t| t.user_id == user_id && t.is_active())
    }

    /// Close the shift, force-closing a running break.
    pub fn clock_out(store: &mut Store, id: DbId) -> Result<Timesheet, CoreError> {
        let sheet = store.timesheets.require_mut(ENTITY, id)?;
        let out = timesheet::clock_out(sheet.clock_out, &mut sheet.breaks, Utc::now())?;
        sheet.clock_out = Some(out);
        Ok(sheet.clone())
    }

    pub fn start_break(store: &mut Store, id: DbId) -> Result<Timesheet, CoreError> {
        let sheet = store.timesheets.require_mut(ENTITY, id)?;
        timesheet::start_break(sheet.clock_out, &mut sheet.breaks, Utc::now())?;
        Ok(sheet.clone())
    }

    pub fn end_break(store: &mut Store, id: DbId) -> Result<Timesheet, CoreError> {
        let sheet = store.timesheets.require_mut(ENTITY, id)?;
        timesheet::end_break(sheet.clock_out, &mut sheet.breaks, Utc::now())?;
        Ok(sheet.clone())
    }

    /// Record a manager decision. Returns the audit action, which depends on
    /// whether the sheet was flagged.
    pub fn update_status(
        store: &mut Store,
        id: DbId,
        status: TimesheetStatus,
    ) -> Result<(Timesheet, TimesheetAction), CoreError> {
        let sheet = store.timesheets.require_mut(ENTITY, id)?;
        let action = timesheet::review_action(sheet.status, status)?;
        sheet.status = status;
        Ok((sheet.clone(), action))
    }

    pub fn update_details(
        store: &mut Store,
        id: DbId,
        input: &UpdateTimesheetDetails,
    ) -> Result<Timesheet, CoreError> {
        let sheet = store.timesheets.require_mut(ENTITY, id)?;
        if let Some(comment) = &input.comment {
            sheet.comment = comment.clone();
        }
        if let Some(work_type) = input.work_type {
            sheet.work_type = work_type;
        }
        Ok(sheet.clone())
    }

    pub fn list_by_project(store: &Store, project_id: DbId) -> Vec<Timesheet> {
        store
            .timesheets
            .iter()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect()
    }

    pub fn list_by_user(store: &Store, user_id: DbId) -> Vec<Timesheet> {
        store
            .timesheets
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn list_flagged_by_company(store: &Store, company_id: DbId) -> Vec<Timesheet> {
        let project_ids: HashSet<DbId> = ProjectRepo::ids_for_company(store, company_id);
        store
            .timesheets
            .iter()
            .filter(|t| t.status == TimesheetStatus::Flagged && project_ids.contains(&t.project_id))
            .cloned()
            .collect()
    }
}
