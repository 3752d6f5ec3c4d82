//! Demo dataset loaded at startup when `SEED_DEMO_DATA` is enabled.
//!
//! Timestamps are relative to the moment of seeding so that "overdue" and
//! "recent activity" look the same on every run.

use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use groundwork_core::audit::{
    AuditAction, AuditTarget, DocumentAction, ProjectAction, TargetKind, TimesheetAction,
    TodoAction,
};
use groundwork_core::daily_log::Weather;
use groundwork_core::document::{
    DocumentCategory, DocumentStatus, PLACEHOLDER_IMAGE_URL, SAMPLE_PDF_URL, UNRESOLVED_URL,
};
use groundwork_core::equipment::{EquipmentKind, EquipmentStatus, ResourceType};
use groundwork_core::geo::GeoPoint;
use groundwork_core::rfi::RfiStatus;
use groundwork_core::roles::Role;
use groundwork_core::safety::{IncidentSeverity, IncidentStatus, IncidentType};
use groundwork_core::settings::{NotificationPreferences, Theme};
use groundwork_core::timesheet::{Break, TimesheetStatus, WorkType};
use groundwork_core::todo::{Comment, SubTask, TodoPriority, TodoStatus};
use groundwork_core::types::{DbId, Timestamp};

use crate::models::audit::NewAuditEntry;
use crate::models::company::{Company, CompanySettings};
use crate::models::daily_log::DailyLog;
use crate::models::document::{DocumentAcknowledgement, DocumentRecord};
use crate::models::equipment::{Equipment, ResourceAssignment};
use crate::models::project::{ProjectAssignment, ProjectRow};
use crate::models::rfi::Rfi;
use crate::models::safety::SafetyIncident;
use crate::models::site::Site;
use crate::models::timesheet::Timesheet;
use crate::models::todo::Todo;
use crate::models::user::User;
use crate::repositories::AuditRepo;
use crate::Store;

/// Populate an empty store with two companies and their projects.
pub fn load_demo_data(store: &mut Store) {
    let now = Utc::now();
    let ago = |d: Duration| now - d;

    seed_companies(store, now);
    seed_projects(store, &ago);
    seed_timesheets(store, now, &ago);
    seed_documents(store, &ago);
    seed_todos(store, now, &ago);
    seed_field_records(store, now, &ago);
    seed_audit_log(store, now, &ago);

    tracing::debug!(
        users = store.users.len(),
        projects = store.projects.len(),
        documents = store.documents.len(),
        audit_entries = store.audit_logs.len(),
        "Demo data loaded"
    );
}

// ---------------------------------------------------------------------------
// Companies, people, sites
// ---------------------------------------------------------------------------

fn seed_companies(store: &mut Store, now: Timestamp) {
    for (id, name) in [(1, "BuildRight Inc."), (2, "Apex Constructions")] {
        store.companies.push_back(Company { id, name: name.into() });
    }

    let users: [(DbId, &str, &str, Role, DbId); 8] = [
        (1, "Alice Admin", "alice@buildright.com", Role::CompanyAdmin, 1),
        (2, "Bob Manager", "bob@buildright.com", Role::ProjectManager, 1),
        (3, "Charlie Operator", "charlie@buildright.com", Role::Operative, 1),
        (4, "Diana Operator", "diana@buildright.com", Role::Operative, 1),
        (5, "Eve Admin", "eve@apex.com", Role::CompanyAdmin, 2),
        (6, "Frank Manager", "frank@apex.com", Role::ProjectManager, 2),
        (7, "Gary Foreman", "gary@buildright.com", Role::Foreman, 1),
        (8, "Heidi Safety", "heidi@buildright.com", Role::SafetyOfficer, 1),
    ];
    for (id, name, email, role, company_id) in users {
        store.users.push_back(User {
            id,
            name: name.into(),
            email: email.into(),
            role,
            company_id,
            created_at: now,
        });
    }

    let sites = [
        (1, "Metro Gateway Site", 34.0522, -118.2437, 250.0, 1),
        (2, "Valley Commercial Park", 34.1522, -118.3437, 500.0, 1),
        (3, "Coastal Residences Site", 33.7701, -118.1937, 300.0, 2),
    ];
    for (id, name, lat, lng, radius, company_id) in sites {
        store.sites.push_back(Site {
            id,
            name: name.into(),
            location: GeoPoint::new(lat, lng),
            radius,
            company_id,
            created_at: now,
        });
    }

    let settings = [
        (1, 90, Theme::Light, (true, true, false)),
        (2, 180, Theme::Dark, (true, true, true)),
    ];
    for (company_id, retention, theme, (due, assigned, flagged)) in settings {
        store.company_settings.push_back(CompanySettings {
            id: company_id,
            company_id,
            timesheet_retention_days: retention,
            theme: Some(theme),
            notification_preferences: NotificationPreferences {
                task_due_date: Some(due),
                new_document_assigned: Some(assigned),
                timesheet_flagged: Some(flagged),
            },
        });
    }
}

fn seed_projects(store: &mut Store, ago: &impl Fn(Duration) -> Timestamp) {
    let projects = [
        (1, "Downtown Tower Foundation", 1, 1, 2, 20),
        (2, "Suburban Mall Parking Structure", 2, 1, 2, 18),
        (3, "Ocean View Condos - Phase 1", 3, 2, 6, 15),
    ];
    for (id, name, site_id, company_id, manager_id, age_days) in projects {
        store.projects.push_back(ProjectRow {
            id,
            name: name.into(),
            site_id,
            company_id,
            manager_id,
            created_at: ago(Duration::days(age_days)),
        });
    }
    for (user_id, project_id) in [(3, 1), (4, 1), (3, 2), (7, 1), (8, 1)] {
        store.assignments.push(ProjectAssignment { user_id, project_id });
    }
}

// ---------------------------------------------------------------------------
// Timesheets
// ---------------------------------------------------------------------------

fn seed_timesheets(store: &mut Store, now: Timestamp, ago: &impl Fn(Duration) -> Timestamp) {
    let reasons = |key: &str, value: &str| BTreeMap::from([(key.to_string(), value.to_string())]);

    store.timesheets.push_back(Timesheet {
        id: 1,
        user_id: 3,
        project_id: 1,
        clock_in: ago(Duration::hours(8)),
        clock_out: Some(now),
        status: TimesheetStatus::Flagged,
        location: None,
        trust_score: 0.7,
        trust_reasons: reasons("geofence", "Outside by 55m"),
        breaks: vec![Break {
            start_time: ago(Duration::hours(4)),
            end_time: Some(ago(Duration::minutes(210))),
        }],
        work_type: WorkType::EquipmentOperation,
        comment: "Excavator was running slow.".into(),
    });
    store.timesheets.push_back(Timesheet {
        id: 2,
        user_id: 4,
        project_id: 1,
        clock_in: ago(Duration::hours(9)),
        clock_out: Some(ago(Duration::hours(1))),
        status: TimesheetStatus::Approved,
        location: None,
        trust_score: 1.0,
        trust_reasons: BTreeMap::new(),
        breaks: Vec::new(),
        work_type: WorkType::GeneralLabor,
        comment: "Standard day, productive.".into(),
    });
    store.timesheets.push_back(Timesheet {
        id: 3,
        user_id: 3,
        project_id: 2,
        clock_in: ago(Duration::hours(24)),
        clock_out: Some(ago(Duration::hours(16))),
        status: TimesheetStatus::Rejected,
        location: None,
        trust_score: 0.9,
        trust_reasons: reasons("accuracy", "low"),
        breaks: Vec::new(),
        work_type: WorkType::SitePreparation,
        comment: String::new(),
    });
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

struct DocSeed {
    id: DbId,
    name: &'static str,
    url: &'static str,
    project_id: DbId,
    status: DocumentStatus,
    age: Duration,
    category: DocumentCategory,
    content: &'static str,
    version: i32,
    group: DbId,
    creator_id: DbId,
}

fn seed_documents(store: &mut Store, ago: &impl Fn(Duration) -> Timestamp) {
    let docs = [
        DocSeed {
            id: 1,
            name: "Safety Manual v1.2.pdf",
            url: SAMPLE_PDF_URL,
            project_id: 1,
            status: DocumentStatus::Approved,
            age: Duration::zero(),
            category: DocumentCategory::HealthAndSafety,
            content: "This document contains important safety procedures. All personnel must read and acknowledge section 4 regarding fire extinguisher usage. Hazard identification is crucial.",
            version: 2,
            group: 1,
            creator_id: 2,
        },
        DocSeed {
            id: 5,
            name: "Safety Manual v1.1.pdf",
            url: UNRESOLVED_URL,
            project_id: 1,
            status: DocumentStatus::Quarantined,
            age: Duration::days(7),
            category: DocumentCategory::HealthAndSafety,
            content: "Older version. Contains outdated fire safety protocols.",
            version: 1,
            group: 1,
            creator_id: 2,
        },
        DocSeed {
            id: 2,
            name: "Building Blueprints Rev C.png",
            url: PLACEHOLDER_IMAGE_URL,
            project_id: 1,
            status: DocumentStatus::Approved,
            age: Duration::days(1),
            category: DocumentCategory::Blueprint,
            content: "Floor plan for level 3. Structural support beams noted in red. Electrical wiring diagram included. HVAC system layout. The blueprint specifies a 1/2\" rebar.",
            version: 3,
            group: 2,
            creator_id: 2,
        },
        DocSeed {
            id: 6,
            name: "Building Blueprints Rev B.png",
            url: UNRESOLVED_URL,
            project_id: 1,
            status: DocumentStatus::Approved,
            age: Duration::days(14),
            category: DocumentCategory::Blueprint,
            content: "Revision B. Changes to restroom layout on level 2.",
            version: 2,
            group: 2,
            creator_id: 2,
        },
        DocSeed {
            id: 7,
            name: "Building Blueprints Rev A.png",
            url: UNRESOLVED_URL,
            project_id: 1,
            status: DocumentStatus::Approved,
            age: Duration::days(30),
            category: DocumentCategory::Blueprint,
            content: "Initial draft of blueprints.",
            version: 1,
            group: 2,
            creator_id: 2,
        },
        DocSeed {
            id: 3,
            name: "Unsupported File.docx",
            url: UNRESOLVED_URL,
            project_id: 1,
            status: DocumentStatus::Approved,
            age: Duration::days(2),
            category: DocumentCategory::General,
            content: "Meeting notes from the weekly sync. Action items for the concrete pour schedule.",
            version: 1,
            group: 3,
            creator_id: 7,
        },
        DocSeed {
            id: 4,
            name: "General Safety Guidelines.pdf",
            url: UNRESOLVED_URL,
            project_id: 2,
            status: DocumentStatus::Approved,
            age: Duration::days(5),
            category: DocumentCategory::CompanyPolicy,
            content: "Company-wide policy on personal protective equipment (PPE). Hard hats are mandatory on site at all times. All incidents must be reported.",
            version: 1,
            group: 4,
            creator_id: 6,
        },
    ];
    for doc in docs {
        store.documents.push_back(DocumentRecord {
            id: doc.id,
            name: doc.name.into(),
            url: doc.url.into(),
            project_id: doc.project_id,
            status: doc.status,
            uploaded_at: ago(doc.age),
            category: doc.category,
            indexed_content: doc.content.into(),
            version: doc.version,
            document_group_id: doc.group,
            creator_id: doc.creator_id,
        });
    }
    store.document_links.add_edge(1, 4);

    store.acknowledgements.push_back(DocumentAcknowledgement {
        id: 1,
        user_id: 3,
        document_id: 1,
        acknowledged_at: ago(Duration::days(2)),
    });
}

// ---------------------------------------------------------------------------
// To-dos
// ---------------------------------------------------------------------------

fn seed_todos(store: &mut Store, now: Timestamp, ago: &impl Fn(Duration) -> Timestamp) {
    let todo = |id: DbId, text: &str, status, priority, creator_id: DbId| Todo {
        id,
        text: text.into(),
        status,
        project_id: 1,
        priority,
        due_date: None,
        reminder_at: None,
        depends_on: None,
        sub_tasks: Vec::new(),
        comments: Vec::new(),
        created_at: now,
        creator_id,
    };

    store.todos.push_back(Todo {
        due_date: Some(ago(Duration::days(3))),
        created_at: ago(Duration::days(5)),
        ..todo(1, "Inspect foundation rebar", TodoStatus::Done, TodoPriority::High, 2)
    });

    let sub_tasks = [
        (1, "Confirm rebar inspection sign-off", true),
        (2, "Check weather forecast for pour day", false),
        (3, "Book concrete pump", false),
    ]
    .map(|(id, text, completed)| SubTask { id, text: text.into(), completed });
    let comments = [
        (4, "Weather is looking good for next week, let's target Tuesday.", 2, 2),
        (5, "Pump is on standby. Just need the final word.", 7, 1),
    ]
    .map(|(id, text, creator_id, hours)| Comment {
        id,
        text: text.into(),
        creator_id,
        created_at: ago(Duration::hours(hours)),
    });
    store.todos.push_back(Todo {
        due_date: Some(now + Duration::days(2)),
        depends_on: Some(1),
        sub_tasks: sub_tasks.to_vec(),
        comments: comments.to_vec(),
        created_at: ago(Duration::days(2)),
        ..todo(2, "Schedule concrete pour", TodoStatus::InProgress, TodoPriority::High, 2)
    });
    store.observe_child_id(5);

    store.todos.push_back(Todo {
        due_date: Some(ago(Duration::days(1))),
        created_at: ago(Duration::days(2)),
        ..todo(3, "Order drywall materials", TodoStatus::Todo, TodoPriority::High, 7)
    });
    store.todos.push_back(todo(4, "Final site cleanup", TodoStatus::Todo, TodoPriority::Low, 7));
}

// ---------------------------------------------------------------------------
// Safety, RFIs, daily logs, equipment
// ---------------------------------------------------------------------------

fn seed_field_records(store: &mut Store, now: Timestamp, ago: &impl Fn(Duration) -> Timestamp) {
    store.safety_incidents.push_back(SafetyIncident {
        id: 1,
        project_id: 1,
        reporter_id: 7,
        timestamp: ago(Duration::hours(3)),
        severity: IncidentSeverity::Medium,
        incident_type: IncidentType::NearMiss,
        description: "A pallet of bricks slipped from the crane but landed in a cordoned-off area. No injuries or damage.".into(),
        location_on_site: "Zone A, Crane Drop Zone".into(),
        corrective_action_taken: None,
        status: IncidentStatus::UnderReview,
        photo_url: None,
        ai_summary: Some("A pallet of bricks was dropped by a crane in a secure zone, resulting in no injuries or damage.".into()),
    });
    store.safety_incidents.push_back(SafetyIncident {
        id: 2,
        project_id: 1,
        reporter_id: 3,
        timestamp: ago(Duration::hours(28)),
        severity: IncidentSeverity::Low,
        incident_type: IncidentType::HazardObservation,
        description: "Observed water pooling near the main electrical panel on Level 2 after heavy rain.".into(),
        location_on_site: "Level 2, Electrical Room".into(),
        corrective_action_taken: Some("Placed warning signs and notified maintenance to clear the water and check for leaks.".into()),
        status: IncidentStatus::Resolved,
        photo_url: None,
        ai_summary: Some("Water pooling was observed and reported near a main electrical panel, and maintenance was notified after signs were placed.".into()),
    });

    store.rfis.push_back(Rfi {
        id: 1,
        project_id: 1,
        subject: "Clarification on Blueprint C, Section 5".into(),
        question: "The blueprint specifies a 1/2\" rebar, but the structural notes call for 5/8\". Please clarify which is correct before we proceed with the foundation pour.".into(),
        answer: Some("Good catch. Please proceed with the 5/8\" rebar as specified in the structural notes. The blueprint will be updated in the next revision.".into()),
        status: RfiStatus::Answered,
        creator_id: 7,
        assignee_id: Some(2),
        created_at: ago(Duration::days(3)),
        answered_at: Some(ago(Duration::days(2))),
    });
    store.rfis.push_back(Rfi {
        id: 2,
        project_id: 1,
        subject: "Electrical Conduit Pathing".into(),
        question: "The planned path for the main electrical conduit on Level 2 appears to conflict with the HVAC ducting. Can we get an alternative pathing diagram?".into(),
        answer: None,
        status: RfiStatus::Open,
        creator_id: 3,
        assignee_id: Some(2),
        created_at: ago(Duration::days(1)),
        answered_at: None,
    });

    let logs = [
        (1, 7, 1, Weather::Sunny, 25.0, "Foundation rebar inspection completed by city inspector. All clear. Concrete pour scheduled for tomorrow morning. Team B worked on preliminary electrical conduit layout on Level 1."),
        (2, 7, 2, Weather::Cloudy, 22.0, "Continued rebar tying for the main foundation slab. Received delivery of 5 tons of #5 rebar. A minor delay due to a late truck, but we caught up by end of day. Safety meeting held at 8 AM, focused on crane safety."),
        (3, 2, 3, Weather::Rain, 18.0, "Heavy rain in the morning, work was paused for 2 hours. Site drainage systems checked and are working effectively. Afternoon work focused on indoor tasks and material organization."),
    ];
    for (id, author_id, days, weather, temperature, notes) in logs {
        store.daily_logs.push_back(DailyLog {
            id,
            project_id: 1,
            author_id,
            date: ago(Duration::days(days)),
            weather,
            temperature,
            notes: notes.into(),
        });
    }

    let fleet = [
        (1, "Excavator CAT 320", EquipmentKind::Heavy, EquipmentStatus::InUse, 1, Some(1)),
        (2, "Bulldozer D6", EquipmentKind::Heavy, EquipmentStatus::Available, 1, None),
        (3, "Concrete Mixer 5-yard", EquipmentKind::Light, EquipmentStatus::Maintenance, 1, None),
        (4, "Ford F-150", EquipmentKind::Vehicle, EquipmentStatus::InUse, 1, Some(2)),
        (5, "Tower Crane", EquipmentKind::Heavy, EquipmentStatus::Available, 2, None),
    ];
    for (id, name, kind, status, company_id, project_id) in fleet {
        store.equipment.push_back(Equipment {
            id,
            name: name.into(),
            kind,
            status,
            company_id,
            project_id,
        });
    }

    let schedule = [
        (1, 3, ResourceType::User, 1, -5, 10),
        (2, 4, ResourceType::User, 1, -5, 10),
        (3, 1, ResourceType::Equipment, 1, -2, 15),
        (4, 3, ResourceType::User, 2, 11, 25),
        (5, 4, ResourceType::Equipment, 2, 0, 30),
    ];
    for (id, resource_id, resource_type, project_id, start, end) in schedule {
        store.resource_assignments.push_back(ResourceAssignment {
            id,
            resource_id,
            resource_type,
            project_id,
            start_date: now + Duration::days(start),
            end_date: now + Duration::days(end),
        });
    }
}

// ---------------------------------------------------------------------------
// Audit log
// ---------------------------------------------------------------------------

/// History entries, appended oldest first so the hash chain is valid.
fn seed_audit_log(store: &mut Store, now: Timestamp, ago: &impl Fn(Duration) -> Timestamp) {
    let due = (now + Duration::days(2)).format("%Y-%m-%d");
    let history = [
        (Duration::days(3), 2, AuditAction::Project(ProjectAction::UserAssigned), TargetKind::User, 7, "Gary Foreman".to_string()),
        (Duration::days(2), 3, AuditAction::Document(DocumentAction::Acknowledged), TargetKind::Document, 1, "Safety Manual v1.2.pdf".to_string()),
        (Duration::hours(9), 7, AuditAction::Todo(TodoAction::SubtaskDeleted), TargetKind::Todo, 2, "\"Check concrete mix recipe\" from \"Schedule concrete pour\"".to_string()),
        (Duration::hours(8), 2, AuditAction::Todo(TodoAction::DueDateChanged), TargetKind::Todo, 2, format!("due date for \"Schedule concrete pour\" to {due}")),
        (Duration::hours(7), 7, AuditAction::Todo(TodoAction::PriorityChanged), TargetKind::Todo, 3, "priority for \"Order drywall materials\" to High".to_string()),
        (Duration::hours(6), 2, AuditAction::Todo(TodoAction::SubtaskCompleted), TargetKind::Todo, 2, "\"Confirm rebar inspection sign-off\" in \"Schedule concrete pour\"".to_string()),
        (Duration::hours(5), 7, AuditAction::Todo(TodoAction::SubtaskAdded), TargetKind::Todo, 2, "\"Book concrete pump\" to \"Schedule concrete pour\"".to_string()),
        (Duration::hours(4), 2, AuditAction::Todo(TodoAction::CommentAdded), TargetKind::Todo, 2, "on \"Schedule concrete pour\"".to_string()),
        (Duration::hours(1), 2, AuditAction::Timesheet(TimesheetAction::Approved), TargetKind::Timesheet, 2, "for Diana Operator".to_string()),
    ];
    for (age, actor_id, action, kind, target_id, name) in history {
        AuditRepo::append_at(
            store,
            NewAuditEntry {
                project_id: Some(1),
                actor_id,
                action,
                target: Some(AuditTarget::new(kind, target_id, name)),
            },
            ago(age),
        );
    }
}
