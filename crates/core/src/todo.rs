//! To-do aggregate rules: statuses, sub-task completion and change auditing.

use serde::{Deserialize, Serialize};

use crate::audit::TodoAction;
use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Kanban column. Any status may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    Todo,
    InProgress,
    Done,
}

impl TodoStatus {
    /// Board columns in display order.
    pub const COLUMNS: [TodoStatus; 3] = [Self::Todo, Self::InProgress, Self::Done];

    pub fn label(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TodoPriority {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Parse a priority as written by people or the assistant ("High", "low").
    pub fn parse_loose(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTask {
    pub id: DbId,
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: DbId,
    pub text: String,
    pub creator_id: DbId,
    pub created_at: Timestamp,
}

pub fn validate_text(text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation("Text must not be empty".into()));
    }
    Ok(())
}

/// Completed / total sub-tasks, or `None` when there are no sub-tasks.
pub fn completion_ratio(sub_tasks: &[SubTask]) -> Option<f64> {
    if sub_tasks.is_empty() {
        return None;
    }
    let done = sub_tasks.iter().filter(|s| s.completed).count();
    Some(done as f64 / sub_tasks.len() as f64)
}

/// Past due and not yet done.
pub fn is_overdue(due_date: Option<Timestamp>, status: TodoStatus, now: Timestamp) -> bool {
    status != TodoStatus::Done && due_date.is_some_and(|due| due < now)
}

// ---------------------------------------------------------------------------
// Change auditing
// ---------------------------------------------------------------------------

/// Current audited fields of a to-do.
#[derive(Debug, Clone, Copy)]
pub struct AuditedFields<'a> {
    pub text: &'a str,
    pub status: TodoStatus,
    pub priority: TodoPriority,
    pub due_date: Option<Timestamp>,
}

/// Requested changes to audited fields. `None` leaves the field untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditedChanges<'a> {
    pub text: Option<&'a str>,
    pub status: Option<TodoStatus>,
    pub priority: Option<TodoPriority>,
    pub due_date: Option<Timestamp>,
}

/// Audit entries (action + target description) for the fields whose value
/// actually changes. Descriptions quote the text as it was before the update.
pub fn changed_fields(
    current: AuditedFields<'_>,
    changes: AuditedChanges<'_>,
) -> Vec<(TodoAction, String)> {
    let text = current.text;
    let mut entries = Vec::new();

    if let Some(status) = changes.status.filter(|s| *s != current.status) {
        entries.push((
            TodoAction::StatusChanged,
            format!("\"{text}\" to {}", status.label()),
        ));
    }
    if let Some(priority) = changes.priority.filter(|p| *p != current.priority) {
        entries.push((
            TodoAction::PriorityChanged,
            format!("priority for \"{text}\" to {}", priority.label()),
        ));
    }
    if let Some(due) = changes.due_date.filter(|d| Some(*d) != current.due_date) {
        entries.push((
            TodoAction::DueDateChanged,
            format!("due date for \"{text}\" to {}", due.format("%Y-%m-%d")),
        ));
    }
    if let Some(new_text) = changes.text.filter(|t| *t != text) {
        entries.push((
            TodoAction::TextChanged,
            format!("\"{text}\" to \"{new_text}\""),
        ));
    }
    entries
}

/// Validate a prerequisite and pick the audit action for changing it.
///
/// Dependencies are advisory; they never block status changes.
pub fn dependency_change(
    todo_id: DbId,
    current: Option<DbId>,
    requested: Option<DbId>,
) -> Result<Option<TodoAction>, CoreError> {
    if requested == Some(todo_id) {
        return Err(CoreError::Validation(
            "A to-do cannot depend on itself".into(),
        ));
    }
    Ok(match (current, requested) {
        (a, b) if a == b => None,
        (_, Some(_)) => Some(TodoAction::DependencyAdded),
        (Some(_), None) => Some(TodoAction::DependencyRemoved),
        (None, None) => None,
    })
}

/// Audit action for a sub-task update, or `None` when nothing changes.
pub fn subtask_update_action(
    current: &SubTask,
    text: Option<&str>,
    completed: Option<bool>,
) -> Option<TodoAction> {
    if completed == Some(true) && !current.completed {
        return Some(TodoAction::SubtaskCompleted);
    }
    let text_changed = text.is_some_and(|t| t != current.text);
    let completion_changed = completed.is_some_and(|c| c != current.completed);
    (text_changed || completion_changed).then_some(TodoAction::SubtaskUpdated)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn subtasks(done: &[bool]) -> Vec<SubTask> {
        done.iter()
            .enumerate()
            .map(|(i, c)| SubTask { id: i as DbId + 1, text: format!("step {i}"), completed: *c })
            .collect()
    }

    fn fields(text: &str) -> AuditedFields<'_> {
        AuditedFields {
            text,
            status: TodoStatus::Todo,
            priority: TodoPriority::Medium,
            due_date: None,
        }
    }

    // -----------------------------------------------------------------------
    // Completion
    // -----------------------------------------------------------------------

    #[test]
    fn ratio_counts_completed_subtasks() {
        assert_eq!(completion_ratio(&subtasks(&[true, false, false])), Some(1.0 / 3.0));
        assert_eq!(completion_ratio(&subtasks(&[true, true, false])), Some(2.0 / 3.0));
    }

    #[test]
    fn ratio_is_none_without_subtasks() {
        assert_eq!(completion_ratio(&[]), None);
    }

    #[test]
    fn overdue_ignores_done_tasks() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let past = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        assert!(is_overdue(Some(past), TodoStatus::InProgress, now));
        assert!(!is_overdue(Some(past), TodoStatus::Done, now));
        assert!(!is_overdue(None, TodoStatus::Todo, now));
    }

    // -----------------------------------------------------------------------
    // Change detection
    // -----------------------------------------------------------------------

    #[test]
    fn unchanged_status_is_not_logged() {
        let changes = AuditedChanges { status: Some(TodoStatus::Todo), ..Default::default() };
        assert!(changed_fields(fields("Pour slab"), changes).is_empty());
    }

    #[test]
    fn status_and_priority_changes_are_logged_separately() {
        let changes = AuditedChanges {
            status: Some(TodoStatus::Done),
            priority: Some(TodoPriority::High),
            ..Default::default()
        };
        let entries = changed_fields(fields("Pour slab"), changes);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], (TodoAction::StatusChanged, "\"Pour slab\" to Done".to_string()));
        assert_eq!(
            entries[1],
            (TodoAction::PriorityChanged, "priority for \"Pour slab\" to High".to_string())
        );
    }

    #[test]
    fn due_date_change_is_logged() {
        let due = Utc.with_ymd_and_hms(2024, 7, 4, 0, 0, 0).unwrap();
        let changes = AuditedChanges { due_date: Some(due), ..Default::default() };
        let entries = changed_fields(fields("Pour slab"), changes);
        assert_eq!(entries[0].0, TodoAction::DueDateChanged);
        assert!(entries[0].1.ends_with("2024-07-04"));
    }

    #[test]
    fn text_change_is_logged() {
        let changes = AuditedChanges { text: Some("Pour east slab"), ..Default::default() };
        assert_eq!(changed_fields(fields("Pour slab"), changes)[0].0, TodoAction::TextChanged);
    }

    // -----------------------------------------------------------------------
    // Dependencies and sub-tasks
    // -----------------------------------------------------------------------

    #[test]
    fn self_dependency_rejected() {
        assert_matches!(dependency_change(2, None, Some(2)), Err(CoreError::Validation(_)));
    }

    #[test]
    fn dependency_actions() {
        assert_eq!(dependency_change(2, None, Some(1)).unwrap(), Some(TodoAction::DependencyAdded));
        assert_eq!(dependency_change(2, Some(1), None).unwrap(), Some(TodoAction::DependencyRemoved));
        assert_eq!(dependency_change(2, Some(1), Some(1)).unwrap(), None);
    }

    #[test]
    fn completing_subtask_logs_completed() {
        let st = SubTask { id: 1, text: "Book pump".into(), completed: false };
        assert_eq!(subtask_update_action(&st, None, Some(true)), Some(TodoAction::SubtaskCompleted));
    }

    #[test]
    fn reopening_or_renaming_subtask_logs_updated() {
        let st = SubTask { id: 1, text: "Book pump".into(), completed: true };
        assert_eq!(subtask_update_action(&st, None, Some(false)), Some(TodoAction::SubtaskUpdated));
        assert_eq!(
            subtask_update_action(&st, Some("Book two pumps"), None),
            Some(TodoAction::SubtaskUpdated)
        );
        assert_eq!(subtask_update_action(&st, Some("Book pump"), Some(true)), None);
    }

    #[test]
    fn loose_priority_parsing() {
        assert_eq!(TodoPriority::parse_loose("High"), Some(TodoPriority::High));
        assert_eq!(TodoPriority::parse_loose(" low "), Some(TodoPriority::Low));
        assert_eq!(TodoPriority::parse_loose("urgent"), None);
    }
}
