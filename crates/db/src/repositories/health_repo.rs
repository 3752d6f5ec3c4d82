//! Read model feeding project health assessments.

use chrono::Duration;
use groundwork_core::error::CoreError;
use groundwork_core::health::{ProjectMetrics, RECENT_ACTIVITY_DAYS};
use groundwork_core::todo::{is_overdue, TodoPriority, TodoStatus};
use groundwork_core::types::{DbId, Timestamp};

use crate::models::project::Project;
use crate::repositories::{AssignmentRepo, ProjectRepo};
use crate::Store;

pub struct HealthRepo;

impl HealthRepo {
    /// Snapshot of the counters a health report is based on.
    pub fn project_metrics(
        store: &Store,
        project_id: DbId,
        now: Timestamp,
    ) -> Result<(Project, ProjectMetrics), CoreError> {
        let project = ProjectRepo::require(store, project_id)?;
        let todos: Vec<_> = store
            .todos
            .iter()
            .filter(|t| t.project_id == project_id)
            .collect();
        let incidents: Vec<_> = store
            .safety_incidents
            .iter()
            .filter(|i| i.project_id == project_id)
            .collect();
        let since = now - Duration::days(RECENT_ACTIVITY_DAYS);

        let metrics = ProjectMetrics {
            total_tasks: todos.len(),
            completed_tasks: todos.iter().filter(|t| t.status == TodoStatus::Done).count(),
            overdue_tasks: todos
                .iter()
                .filter(|t| is_overdue(t.due_date, t.status, now))
                .count(),
            open_high_priority_tasks: todos
                .iter()
                .filter(|t| t.priority == TodoPriority::High && t.status != TodoStatus::Done)
                .count(),
            total_incidents: incidents.len(),
            serious_incidents: incidents.iter().filter(|i| i.severity.is_serious()).count(),
            recent_activity: store
                .audit_logs
                .iter()
                .filter(|e| e.project_id == Some(project_id) && e.timestamp >= since)
                .count(),
            team_size: AssignmentRepo::member_ids(store, project_id).len(),
            total_documents: store
                .documents
                .iter()
                .filter(|d| d.project_id == project_id)
                .count(),
        };
        Ok((project, metrics))
    }
}
