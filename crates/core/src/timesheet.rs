//! Timesheet lifecycle rules: breaks, clock-out, and manager review.
//!
//! ```text
//! clock-in ──> active (clock_out = None) ──clock-out──> closed
//!                 │  start/end break (any number of times)
//! status:  Pending | Flagged ──review──> Approved | Rejected (terminal)
//! ```

use serde::{Deserialize, Serialize};

use crate::audit::TimesheetAction;
use crate::error::CoreError;
use crate::types::Timestamp;

/// Review status of a timesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimesheetStatus {
    Pending,
    Approved,
    Rejected,
    Flagged,
}

impl TimesheetStatus {
    /// Approved and Rejected are final.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

/// Kind of work recorded against a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkType {
    GeneralLabor,
    EquipmentOperation,
    Supervision,
    SitePreparation,
    FinishingWork,
}

impl WorkType {
    pub fn label(self) -> &'static str {
        match self {
            Self::GeneralLabor => "General Labor",
            Self::EquipmentOperation => "Equipment Operation",
            Self::Supervision => "Supervision",
            Self::SitePreparation => "Site Preparation",
            Self::FinishingWork => "Finishing Work",
        }
    }
}

/// A break within a shift. `end_time == None` while the break is running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Break {
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
}

impl Break {
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }
}

// ---------------------------------------------------------------------------
// Break transitions
// ---------------------------------------------------------------------------

/// The in-progress break, if any.
pub fn open_break(breaks: &[Break]) -> Option<&Break> {
    breaks.iter().find(|b| b.is_open())
}

/// Guard: the shift must still be running.
pub fn ensure_clocked_in(clock_out: Option<Timestamp>) -> Result<(), CoreError> {
    match clock_out {
        None => Ok(()),
        Some(_) => Err(CoreError::Conflict(
            "Timesheet is already clocked out".into(),
        )),
    }
}

/// Start a new break. Fails without mutating when the shift is closed or a
/// break is already running.
pub fn start_break(
    clock_out: Option<Timestamp>,
    breaks: &mut Vec<Break>,
    now: Timestamp,
) -> Result<(), CoreError> {
    ensure_clocked_in(clock_out)?;
    if open_break(breaks).is_some() {
        return Err(CoreError::Conflict("A break is already in progress".into()));
    }
    breaks.push(Break {
        start_time: now,
        end_time: None,
    });
    Ok(())
}

/// End the running break. Fails without mutating when the shift is closed or
/// no break is running.
pub fn end_break(
    clock_out: Option<Timestamp>,
    breaks: &mut [Break],
    now: Timestamp,
) -> Result<(), CoreError> {
    ensure_clocked_in(clock_out)?;
    let running = breaks
        .iter_mut()
        .find(|b| b.is_open())
        .ok_or_else(|| CoreError::Conflict("No active break to end".into()))?;
    running.end_time = Some(now);
    Ok(())
}

/// Close the shift: returns the clock-out time and force-closes a running
/// break at the same instant.
pub fn clock_out(
    clock_out: Option<Timestamp>,
    breaks: &mut [Break],
    now: Timestamp,
) -> Result<Timestamp, CoreError> {
    ensure_clocked_in(clock_out)?;
    if let Some(running) = breaks.iter_mut().find(|b| b.is_open()) {
        running.end_time = Some(now);
    }
    Ok(now)
}

// ---------------------------------------------------------------------------
// Review
// ---------------------------------------------------------------------------

/// Validate a manager review and pick the audit action it records.
///
/// The resulting status is the same whether the timesheet was Pending or
/// Flagged, but the audit action differs so flag resolutions stay visible.
pub fn review_action(
    current: TimesheetStatus,
    target: TimesheetStatus,
) -> Result<TimesheetAction, CoreError> {
    if current.is_terminal() {
        return Err(CoreError::Conflict(format!(
            "Timesheet has already been reviewed ({current:?})"
        )));
    }
    match (current, target) {
        (TimesheetStatus::Flagged, TimesheetStatus::Approved) => Ok(TimesheetAction::FlagApproved),
        (TimesheetStatus::Flagged, TimesheetStatus::Rejected) => Ok(TimesheetAction::FlagRejected),
        (_, TimesheetStatus::Approved) => Ok(TimesheetAction::Approved),
        (_, TimesheetStatus::Rejected) => Ok(TimesheetAction::Rejected),
        (_, other) => Err(CoreError::Validation(format!(
            "Review status must be approved or rejected, got {other:?}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Durations
// ---------------------------------------------------------------------------

/// Net worked minutes: shift length minus break time. Open shifts and open
/// breaks are measured up to `now`.
pub fn worked_minutes(
    clock_in: Timestamp,
    clock_out: Option<Timestamp>,
    breaks: &[Break],
    now: Timestamp,
) -> i64 {
    let end = clock_out.unwrap_or(now);
    let shift = end - clock_in;
    let paused = breaks
        .iter()
        .map(|b| b.end_time.unwrap_or(end) - b.start_time)
        .fold(chrono::Duration::zero(), |acc, d| acc + d);
    (shift - paused).num_minutes().max(0)
}
