use groundwork_core::safety::{IncidentSeverity, IncidentStatus, IncidentType};
use groundwork_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::Record;

#[derive(Debug, Clone, Serialize)]
pub struct SafetyIncident {
    pub id: DbId,
    pub project_id: DbId,
    pub reporter_id: DbId,
    pub timestamp: Timestamp,
    pub severity: IncidentSeverity,
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    pub description: String,
    pub location_on_site: String,
    pub corrective_action_taken: Option<String>,
    pub status: IncidentStatus,
    pub photo_url: Option<String>,
    pub ai_summary: Option<String>,
}

impl Record for SafetyIncident {
    fn id(&self) -> DbId {
        self.id
    }
}

/// A new incident report. The reporter is the acting user.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportIncident {
    pub project_id: DbId,
    pub severity: IncidentSeverity,
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    pub description: String,
    pub location_on_site: String,
    pub corrective_action_taken: Option<String>,
    pub photo_url: Option<String>,
    /// When the incident happened; defaults to now.
    pub timestamp: Option<Timestamp>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateIncidentStatus {
    pub status: IncidentStatus,
}
