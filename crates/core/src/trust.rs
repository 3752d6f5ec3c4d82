//! Clock-in trust scoring.
//!
//! A clock-in starts fully trusted and loses confidence for each signal that
//! suggests the worker may not be on site. Scores are kept in integer
//! hundredths internally so `1.0 - 0.4 - 0.2` lands exactly on `0.4`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geo::{GeoPoint, Geofence};
use crate::timesheet::TimesheetStatus;

// ---------------------------------------------------------------------------
// Scoring constants
// ---------------------------------------------------------------------------

/// Penalty (hundredths) for a clock-in outside the site geofence.
pub const GEOFENCE_PENALTY: i32 = 40;

/// Penalty (hundredths) for a low-accuracy GPS fix.
pub const ACCURACY_PENALTY: i32 = 20;

/// GPS accuracy (metres) above which the fix is considered unreliable.
pub const MAX_RELIABLE_ACCURACY_M: f64 = 50.0;

/// Lowest score a clock-in can receive (hundredths).
pub const MIN_SCORE: i32 = 10;

/// Scores strictly below this (hundredths) flag the timesheet for review.
pub const FLAG_THRESHOLD: i32 = 80;

/// Reason key recorded when the clock-in is outside the geofence.
pub const REASON_GEOFENCE: &str = "geofence";

/// Reason key recorded when GPS accuracy is poor.
pub const REASON_ACCURACY: &str = "accuracy";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Location reported by the device at clock-in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportedLocation {
    pub lat: f64,
    pub lng: f64,
    /// Reported horizontal accuracy in metres.
    pub accuracy: f64,
}

impl ReportedLocation {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// Outcome of scoring a clock-in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrustAssessment {
    /// Confidence in `[0.1, 1.0]`.
    pub score: f64,
    /// Reason code -> human-readable description.
    pub reasons: BTreeMap<String, String>,
    pub flagged: bool,
}

impl TrustAssessment {
    /// Initial timesheet status implied by this assessment.
    pub fn initial_status(&self) -> TimesheetStatus {
        if self.flagged {
            TimesheetStatus::Flagged
        } else {
            TimesheetStatus::Pending
        }
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Score a clock-in against the project's geofence.
///
/// When the project could not be resolved (`geofence == None`) the geofence
/// check is skipped and only accuracy counts. Never fails.
pub fn assess_clock_in(location: &ReportedLocation, geofence: Option<&Geofence>) -> TrustAssessment {
    let mut score = 100;
    let mut reasons = BTreeMap::new();

    if let Some(overshoot) = geofence.and_then(|fence| fence.overshoot_m(&location.point())) {
        score -= GEOFENCE_PENALTY;
        reasons.insert(
            REASON_GEOFENCE.to_string(),
            format!("Outside geofence by {}m", overshoot.round() as i64),
        );
    }

    if location.accuracy > MAX_RELIABLE_ACCURACY_M {
        score -= ACCURACY_PENALTY;
        reasons.insert(
            REASON_ACCURACY.to_string(),
            format!("Low accuracy ({}m)", location.accuracy.round() as i64),
        );
    }

    TrustAssessment {
        score: f64::from(score.max(MIN_SCORE)) / 100.0,
        reasons,
        flagged: score < FLAG_THRESHOLD,
    }
}
