//! Project health metrics and report normalisation.

use serde::{Deserialize, Serialize};

/// Window used for the "recent activity" metric.
pub const RECENT_ACTIVITY_DAYS: i64 = 7;

/// Score given when no assessment could be produced.
pub const FALLBACK_SCORE: i32 = 50;

/// Inputs summarised for a project health assessment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetrics {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub overdue_tasks: usize,
    pub open_high_priority_tasks: usize,
    pub total_incidents: usize,
    pub serious_incidents: usize,
    pub recent_activity: usize,
    pub team_size: usize,
    pub total_documents: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub score: i32,
    pub summary: String,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub positives: Vec<String>,
}

impl HealthReport {
    /// Report used when the assessment service is unavailable.
    pub fn fallback() -> Self {
        Self {
            score: FALLBACK_SCORE,
            summary: "AI analysis unavailable. Manual review required.".into(),
            risks: vec!["Could not connect to AI service to assess risks.".into()],
            positives: vec!["System is operational.".into()],
        }
    }

    /// Clamp the score into `0..=100`.
    pub fn normalized(mut self) -> Self {
        self.score = self.score.clamp(0, 100);
        self
    }
}
