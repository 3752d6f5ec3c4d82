//! Safety incident classification.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Summary stored when the assistant could not summarise a report.
pub const NO_AI_SUMMARY: &str = "No AI summary available.";

/// Analysis returned for a project with no incidents on record.
pub const NO_INCIDENTS_REPORT: &str = "No safety incidents reported for this project, which is \
excellent. Maintain vigilance and continue to follow all safety protocols.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl IncidentSeverity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// High and Critical incidents count against project health.
    pub fn is_serious(self) -> bool {
        self >= Self::High
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentType {
    Injury,
    NearMiss,
    PropertyDamage,
    HazardObservation,
}

impl IncidentType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Injury => "Injury",
            Self::NearMiss => "Near Miss",
            Self::PropertyDamage => "Property Damage",
            Self::HazardObservation => "Hazard Observation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    Reported,
    UnderReview,
    Resolved,
}

impl IncidentStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Reported => "Reported",
            Self::UnderReview => "Under Review",
            Self::Resolved => "Resolved",
        }
    }
}

pub fn validate_report(description: &str, location_on_site: &str) -> Result<(), CoreError> {
    if description.trim().is_empty() {
        return Err(CoreError::Validation(
            "Incident description must not be empty".into(),
        ));
    }
    if location_on_site.trim().is_empty() {
        return Err(CoreError::Validation(
            "Incident location must not be empty".into(),
        ));
    }
    Ok(())
}
