//! Clock-in scoring and the timesheet lifecycle against the demo store.

use assert_matches::assert_matches;
use groundwork_core::audit::TimesheetAction;
use groundwork_core::error::CoreError;
use groundwork_core::geo::EARTH_RADIUS_M;
use groundwork_core::timesheet::{TimesheetStatus, WorkType};
use groundwork_core::trust::{ReportedLocation, REASON_ACCURACY, REASON_GEOFENCE};
use groundwork_db::models::timesheet::ClockIn;
use groundwork_db::repositories::TimesheetRepo;
use groundwork_db::{seed, Store};

const SITE_LAT: f64 = 34.0522;
const SITE_LNG: f64 = -118.2437;

fn demo_store() -> Store {
    let mut store = Store::default();
    seed::load_demo_data(&mut store);
    store
}

/// A fix `metres` north of the Metro Gateway site centre.
fn clock_in(user_id: i64, project_id: i64, metres: f64, accuracy: f64) -> ClockIn {
    let deg_per_m = 180.0 / (EARTH_RADIUS_M * std::f64::consts::PI);
    ClockIn {
        user_id,
        project_id,
        location: ReportedLocation {
            lat: SITE_LAT + metres * deg_per_m,
            lng: SITE_LNG,
            accuracy,
        },
        work_type: WorkType::GeneralLabor,
    }
}

#[test]
fn on_site_clock_in_is_trusted() {
    let mut store = demo_store();
    let (sheet, assessment) = TimesheetRepo::clock_in(&mut store, &clock_in(4, 1, 10.0, 8.0)).unwrap();
    assert_eq!(sheet.status, TimesheetStatus::Pending);
    assert_eq!(sheet.trust_score, 1.0);
    assert!(sheet.trust_reasons.is_empty());
    assert!(!assessment.flagged);
    assert!(sheet.is_active());
}

#[test]
fn off_site_low_accuracy_clock_in_is_flagged() {
    let mut store = demo_store();
    let (sheet, _) = TimesheetRepo::clock_in(&mut store, &clock_in(4, 1, 400.0, 120.0)).unwrap();
    assert_eq!(sheet.status, TimesheetStatus::Flagged);
    assert_eq!(sheet.trust_score, 0.4);
    assert!(sheet.trust_reasons.contains_key(REASON_GEOFENCE));
    assert!(sheet.trust_reasons.contains_key(REASON_ACCURACY));
}

#[test]
fn unknown_project_skips_geofence() {
    let mut store = demo_store();
    let (sheet, _) = TimesheetRepo::clock_in(&mut store, &clock_in(4, 77, 50_000.0, 5.0)).unwrap();
    assert_eq!(sheet.trust_score, 1.0);
    assert_eq!(sheet.status, TimesheetStatus::Pending);
}

#[test]
fn second_active_shift_conflicts() {
    let mut store = demo_store();
    TimesheetRepo::clock_in(&mut store, &clock_in(3, 1, 0.0, 5.0)).unwrap();
    assert_matches!(
        TimesheetRepo::clock_in(&mut store, &clock_in(3, 2, 0.0, 5.0)),
        Err(CoreError::Conflict(msg)) if msg.starts_with("User already has an active timesheet")
    );
}

#[test]
fn invalid_coordinates_are_rejected() {
    let mut store = demo_store();
    let mut input = clock_in(4, 1, 0.0, 5.0);
    input.location.lat = 123.0;
    assert_matches!(
        TimesheetRepo::clock_in(&mut store, &input),
        Err(CoreError::Validation(_))
    );
}

#[test]
fn shift_with_breaks_then_clock_out() {
    let mut store = demo_store();
    let (sheet, _) = TimesheetRepo::clock_in(&mut store, &clock_in(4, 1, 0.0, 5.0)).unwrap();

    TimesheetRepo::start_break(&mut store, sheet.id).unwrap();
    assert_matches!(
        TimesheetRepo::start_break(&mut store, sheet.id),
        Err(CoreError::Conflict(_))
    );
    TimesheetRepo::end_break(&mut store, sheet.id).unwrap();
    TimesheetRepo::start_break(&mut store, sheet.id).unwrap();

    let closed = TimesheetRepo::clock_out(&mut store, sheet.id).unwrap();
    assert!(closed.clock_out.is_some());
    assert_eq!(closed.breaks.len(), 2);
    assert!(closed.breaks.iter().all(|b| b.end_time.is_some()));

    assert_matches!(
        TimesheetRepo::clock_out(&mut store, sheet.id),
        Err(CoreError::Conflict(_))
    );
    assert!(TimesheetRepo::find_active_for_user(&store, 4).is_none());
}

#[test]
fn flagged_review_uses_flag_actions_and_is_final() {
    let mut store = demo_store();
    let (sheet, action) =
        TimesheetRepo::update_status(&mut store, 1, TimesheetStatus::Approved).unwrap();
    assert_eq!(sheet.status, TimesheetStatus::Approved);
    assert_eq!(action, TimesheetAction::FlagApproved);

    assert_matches!(
        TimesheetRepo::update_status(&mut store, 1, TimesheetStatus::Rejected),
        Err(CoreError::Conflict(_))
    );
}

#[test]
fn flagged_list_is_scoped_to_company() {
    let store = demo_store();
    let flagged = TimesheetRepo::list_flagged_by_company(&store, 1);
    assert_eq!(flagged.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1]);
    assert!(TimesheetRepo::list_flagged_by_company(&store, 2).is_empty());
}
