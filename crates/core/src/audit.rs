//! Audit action taxonomy, targets, and the integrity hash chain.
//!
//! This module lives in `core` (zero internal deps) so it can be used by both
//! the repository layer and the API handlers. Actions are grouped by family;
//! each action has a stable SCREAMING_SNAKE code and a human-readable label.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Action families
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimesheetAction {
    Approved,
    Rejected,
    FlaggedForReview,
    FlagApproved,
    FlagRejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectAction {
    UserAssigned,
    UserUnassigned,
    ManagerChanged,
    DailyLogAdded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentAction {
    Uploaded,
    Acknowledged,
    VersionReverted,
    LinkAdded,
    LinkRemoved,
    AiQuery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoAction {
    Added,
    Completed,
    TextChanged,
    PriorityChanged,
    DueDateChanged,
    StatusChanged,
    ReminderSet,
    DependencyAdded,
    DependencyRemoved,
    CommentAdded,
    SubtaskAdded,
    SubtaskCompleted,
    SubtaskUpdated,
    SubtaskDeleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyAction {
    IncidentReported,
    IncidentStatusUpdated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceAction {
    EquipmentAssigned,
    EquipmentUnassigned,
    EquipmentStatusUpdated,
    ResourceScheduled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RfiAction {
    Created,
    Answered,
    AssigneeChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistantAction {
    CostEstimateGenerated,
    SafetyAnalysisGenerated,
    ProjectSearch,
}

/// A recorded action, tagged by family.
///
/// Serializes as `{"family": "timesheet", "kind": "flag_approved"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "family", content = "kind", rename_all = "snake_case")]
pub enum AuditAction {
    Timesheet(TimesheetAction),
    Project(ProjectAction),
    Document(DocumentAction),
    Todo(TodoAction),
    Safety(SafetyAction),
    Resource(ResourceAction),
    Rfi(RfiAction),
    Assistant(AssistantAction),
}

impl AuditAction {
    /// Stable machine code, e.g. `TIMESHEET_FLAGGED_FOR_REVIEW`.
    pub fn code(self) -> &'static str {
        self.describe().0
    }

    /// Human-readable label, e.g. `Timesheet Flagged for Review`.
    pub fn label(self) -> &'static str {
        self.describe().1
    }

    /// Retention category used when grouping the log.
    pub fn category(self) -> &'static str {
        match self {
            Self::Timesheet(_) => log_categories::TIMEKEEPING,
            Self::Document(_) => log_categories::DOCUMENTS,
            Self::Todo(_) => log_categories::TASKS,
            Self::Safety(_) => log_categories::SAFETY,
            Self::Project(_) | Self::Resource(_) | Self::Rfi(_) => log_categories::OPERATIONS,
            Self::Assistant(_) => log_categories::ASSISTANT,
        }
    }

    fn describe(self) -> (&'static str, &'static str) {
        use AssistantAction as A;
        use DocumentAction as D;
        use ProjectAction as P;
        use ResourceAction as R;
        use SafetyAction as S;
        use TimesheetAction as T;
        use TodoAction as Td;

        match self {
            Self::Timesheet(T::Approved) => ("TIMESHEET_APPROVED", "Timesheet Approved"),
            Self::Timesheet(T::Rejected) => ("TIMESHEET_REJECTED", "Timesheet Rejected"),
            Self::Timesheet(T::FlaggedForReview) => {
                ("TIMESHEET_FLAGGED_FOR_REVIEW", "Timesheet Flagged for Review")
            }
            Self::Timesheet(T::FlagApproved) => {
                ("TIMESHEET_FLAG_APPROVED", "Flagged Timesheet Approved")
            }
            Self::Timesheet(T::FlagRejected) => {
                ("TIMESHEET_FLAG_REJECTED", "Flagged Timesheet Rejected")
            }
            Self::Project(P::UserAssigned) => ("USER_ASSIGNED", "User Assigned to Project"),
            Self::Project(P::UserUnassigned) => {
                ("USER_UNASSIGNED", "User Unassigned from Project")
            }
            Self::Project(P::ManagerChanged) => {
                ("PROJECT_MANAGER_CHANGED", "Project Manager Changed")
            }
            Self::Project(P::DailyLogAdded) => ("DAILY_LOG_ADDED", "Daily Log Added"),
            Self::Document(D::Uploaded) => ("DOCUMENT_UPLOADED", "Document Uploaded"),
            Self::Document(D::Acknowledged) => ("DOCUMENT_ACKNOWLEDGED", "Document Acknowledged"),
            Self::Document(D::VersionReverted) => {
                ("DOCUMENT_VERSION_REVERTED", "Document Version Reverted")
            }
            Self::Document(D::LinkAdded) => ("DOCUMENT_LINK_ADDED", "Document Link Added"),
            Self::Document(D::LinkRemoved) => ("DOCUMENT_LINK_REMOVED", "Document Link Removed"),
            Self::Document(D::AiQuery) => ("DOCUMENT_AI_QUERY", "Document AI Query"),
            Self::Todo(Td::Added) => ("TODO_ADDED", "To-Do Added"),
            Self::Todo(Td::Completed) => ("TODO_COMPLETED", "To-Do Completed"),
            Self::Todo(Td::TextChanged) => ("TODO_TEXT_CHANGED", "To-Do Text Changed"),
            Self::Todo(Td::PriorityChanged) => ("TODO_PRIORITY_CHANGED", "To-Do Priority Changed"),
            Self::Todo(Td::DueDateChanged) => ("TODO_DUE_DATE_CHANGED", "To-Do Due Date Changed"),
            Self::Todo(Td::StatusChanged) => ("TODO_STATUS_CHANGED", "To-Do Status Changed"),
            Self::Todo(Td::ReminderSet) => ("TODO_REMINDER_SET", "To-Do Reminder Set"),
            Self::Todo(Td::DependencyAdded) => ("TODO_DEPENDENCY_ADDED", "To-Do Dependency Added"),
            Self::Todo(Td::DependencyRemoved) => {
                ("TODO_DEPENDENCY_REMOVED", "To-Do Dependency Removed")
            }
            Self::Todo(Td::CommentAdded) => ("TODO_COMMENT_ADDED", "Comment Added to To-Do"),
            Self::Todo(Td::SubtaskAdded) => ("SUBTASK_ADDED", "Sub-task Added"),
            Self::Todo(Td::SubtaskCompleted) => ("SUBTASK_COMPLETED", "Sub-task Completed"),
            Self::Todo(Td::SubtaskUpdated) => ("SUBTASK_UPDATED", "Sub-task Updated"),
            Self::Todo(Td::SubtaskDeleted) => ("SUBTASK_DELETED", "Sub-task Deleted"),
            Self::Safety(S::IncidentReported) => {
                ("SAFETY_INCIDENT_REPORTED", "Safety Incident Reported")
            }
            Self::Safety(S::IncidentStatusUpdated) => {
                ("SAFETY_INCIDENT_STATUS_UPDATED", "Safety Incident Status Updated")
            }
            Self::Resource(R::EquipmentAssigned) => {
                ("EQUIPMENT_ASSIGNED", "Equipment Assigned to Project")
            }
            Self::Resource(R::EquipmentUnassigned) => {
                ("EQUIPMENT_UNASSIGNED", "Equipment Unassigned from Project")
            }
            Self::Resource(R::EquipmentStatusUpdated) => {
                ("EQUIPMENT_STATUS_UPDATED", "Equipment Status Updated")
            }
            Self::Resource(R::ResourceScheduled) => ("RESOURCE_SCHEDULED", "Resource Scheduled"),
            Self::Rfi(RfiAction::Created) => ("RFI_CREATED", "RFI Created"),
            Self::Rfi(RfiAction::Answered) => ("RFI_ANSWERED", "RFI Answered"),
            Self::Rfi(RfiAction::AssigneeChanged) => {
                ("RFI_ASSIGNEE_CHANGED", "RFI Assignee Changed")
            }
            Self::Assistant(A::CostEstimateGenerated) => {
                ("COST_ESTIMATE_GENERATED", "Cost Estimate Generated")
            }
            Self::Assistant(A::SafetyAnalysisGenerated) => {
                ("SAFETY_ANALYSIS_GENERATED", "Safety Analysis Generated")
            }
            Self::Assistant(A::ProjectSearch) => ("AI_PROJECT_SEARCH", "AI Project Search"),
        }
    }
}

macro_rules! impl_from_family {
    ($($family:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$family> for AuditAction {
                fn from(action: $family) -> Self {
                    Self::$variant(action)
                }
            }
        )*
    };
}

impl_from_family! {
    TimesheetAction => Timesheet,
    ProjectAction => Project,
    DocumentAction => Document,
    TodoAction => Todo,
    SafetyAction => Safety,
    ResourceAction => Resource,
    RfiAction => Rfi,
    AssistantAction => Assistant,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// Log category constants
// ---------------------------------------------------------------------------

/// Categories used to group audit entries for retention.
pub mod log_categories {
    pub const TIMEKEEPING: &str = "timekeeping";
    pub const DOCUMENTS: &str = "documents";
    pub const TASKS: &str = "tasks";
    pub const SAFETY: &str = "safety";
    pub const OPERATIONS: &str = "operations";
    pub const ASSISTANT: &str = "assistant";
}

// ---------------------------------------------------------------------------
// Targets
// ---------------------------------------------------------------------------

/// Kind of entity an audit entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    User,
    Project,
    Timesheet,
    Document,
    Todo,
    SafetyIncident,
    DailyLog,
    Rfi,
    Equipment,
    ResourceAssignment,
}

/// The entity an audit entry refers to, with a display description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTarget {
    #[serde(rename = "type")]
    pub kind: TargetKind,
    pub id: DbId,
    pub name: String,
}

impl AuditTarget {
    pub fn new(kind: TargetKind, id: DbId, name: impl Into<String>) -> Self {
        Self {
            kind,
            id,
            name: name.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Integrity hash computation
// ---------------------------------------------------------------------------

/// Known seed value for the first entry in the hash chain.
const CHAIN_SEED: &str = "GROUNDWORK_AUDIT_CHAIN_V1";

/// Canonical string form of an entry's content, fed into the hash chain.
pub fn canonical_entry_data(
    id: DbId,
    project_id: Option<DbId>,
    actor_id: DbId,
    action: AuditAction,
    target: Option<&AuditTarget>,
    timestamp: Timestamp,
) -> String {
    let target = target
        .map(|t| format!("{:?}:{}:{}", t.kind, t.id, t.name))
        .unwrap_or_default();
    let project = project_id.map(|p| p.to_string()).unwrap_or_default();
    format!(
        "{id}|{project}|{actor_id}|{}|{target}|{}",
        action.code(),
        timestamp.to_rfc3339()
    )
}

/// Compute the SHA-256 integrity hash for an audit log entry.
///
/// `prev_hash` is the hash of the previous entry, or `None` for the first
/// entry in the chain (which uses a known seed value).
pub fn compute_integrity_hash(prev_hash: Option<&str>, entry_data: &str) -> String {
    let prev = prev_hash.unwrap_or(CHAIN_SEED);
    let digest = Sha256::digest(format!("{prev}|{entry_data}").as_bytes());
    format!("{digest:x}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
