//! Requests for information.

use chrono::Utc;
use groundwork_core::audit::RfiAction;
use groundwork_core::error::CoreError;
use groundwork_core::rfi::{accepts_answer, validate_new, validate_status_change, RfiStatus};
use groundwork_core::types::DbId;

use crate::models::rfi::{CreateRfi, Rfi, UpdateRfi};
use crate::Store;

const ENTITY: &str = "Rfi";

pub struct RfiRepo;

impl RfiRepo {
    pub fn create(store: &mut Store, input: &CreateRfi, creator_id: DbId) -> Result<Rfi, CoreError> {
        validate_new(&input.subject, &input.question)?;
        store.projects.require("Project", input.project_id)?;
        if let Some(assignee) = input.assignee_id {
            store.users.require("User", assignee)?;
        }
        let rfi = Rfi {
            id: store.rfis.allocate_id(),
            project_id: input.project_id,
            subject: input.subject.trim().to_string(),
            question: input.question.trim().to_string(),
            answer: None,
            status: RfiStatus::Open,
            creator_id,
            assignee_id: input.assignee_id,
            created_at: Utc::now(),
            answered_at: None,
        };
        store.rfis.push_front(rfi.clone());
        Ok(rfi)
    }

    pub fn require(store: &Store, id: DbId) -> Result<Rfi, CoreError> {
        store.rfis.require(ENTITY, id).cloned()
    }

    /// Apply an update and return the audit actions it implies.
    ///
    /// The first answer moves the RFI to `Answered`. A later explicit status
    /// may close it but never reopen an answered RFI.
    pub fn update(
        store: &mut Store,
        id: DbId,
        input: &UpdateRfi,
    ) -> Result<(Rfi, Vec<RfiAction>), CoreError> {
        if let Some(assignee) = input.assignee_id {
            store.users.require("User", assignee)?;
        }
        let rfi = store.rfis.require_mut(ENTITY, id)?;
        let answering = accepts_answer(rfi.answer.as_deref(), input.answer.as_deref());
        if let Some(status) = input.status {
            validate_status_change(answering || rfi.answer.is_some(), status)?;
        }

        let mut actions = Vec::new();
        if answering {
            rfi.answer = input.answer.as_deref().map(|a| a.trim().to_string());
            rfi.status = RfiStatus::Answered;
            rfi.answered_at = Some(Utc::now());
            actions.push(RfiAction::Answered);
        }
        if let Some(status) = input.status {
            rfi.status = status;
        }
        if let Some(assignee) = input.assignee_id.filter(|a| rfi.assignee_id != Some(*a)) {
            rfi.assignee_id = Some(assignee);
            actions.push(RfiAction::AssigneeChanged);
        }
        Ok((rfi.clone(), actions))
    }

    /// RFIs of a project, newest first.
    pub fn list_by_project(store: &Store, project_id: DbId) -> Vec<Rfi> {
        let mut rfis: Vec<Rfi> = store
            .rfis
            .iter()
            .filter(|r| r.project_id == project_id)
            .cloned()
            .collect();
        rfis.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rfis
    }
}
