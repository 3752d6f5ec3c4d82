use chrono::Utc;
use groundwork_core::error::CoreError;
use groundwork_core::safety::{validate_report, IncidentStatus};
use groundwork_core::types::DbId;

use crate::models::safety::{ReportIncident, SafetyIncident};
use crate::Store;

const ENTITY: &str = "SafetyIncident";

pub struct SafetyRepo;

impl SafetyRepo {
    /// Store a new report with its (already generated) summary.
    pub fn create(
        store: &mut Store,
        input: &ReportIncident,
        reporter_id: DbId,
        ai_summary: String,
    ) -> Result<SafetyIncident, CoreError> {
        validate_report(&input.description, &input.location_on_site)?;
        store.projects.require("Project", input.project_id)?;
        let incident = SafetyIncident {
            id: store.safety_incidents.allocate_id(),
            project_id: input.project_id,
            reporter_id,
            timestamp: input.timestamp.unwrap_or_else(Utc::now),
            severity: input.severity,
            incident_type: input.incident_type,
            description: input.description.trim().to_string(),
            location_on_site: input.location_on_site.trim().to_string(),
            corrective_action_taken: input.corrective_action_taken.clone(),
            status: IncidentStatus::Reported,
            photo_url: input.photo_url.clone(),
            ai_summary: Some(ai_summary),
        };
        store.safety_incidents.push_front(incident.clone());
        Ok(incident)
    }

    pub fn update_status(
        store: &mut Store,
        id: DbId,
        status: IncidentStatus,
    ) -> Result<SafetyIncident, CoreError> {
        let incident = store.safety_incidents.require_mut(ENTITY, id)?;
        incident.status = status;
        Ok(incident.clone())
    }

    /// Incidents of a project, most recent first.
    pub fn list_by_project(store: &Store, project_id: DbId) -> Vec<SafetyIncident> {
        let mut incidents: Vec<SafetyIncident> = store
            .safety_incidents
            .iter()
            .filter(|i| i.project_id == project_id)
            .cloned()
            .collect();
        incidents.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        incidents
    }
}
