use groundwork_core::rfi::RfiStatus;
use groundwork_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::Record;

#[derive(Debug, Clone, Serialize)]
pub struct Rfi {
    pub id: DbId,
    pub project_id: DbId,
    pub subject: String,
    pub question: String,
    pub answer: Option<String>,
    pub status: RfiStatus,
    pub creator_id: DbId,
    pub assignee_id: Option<DbId>,
    pub created_at: Timestamp,
    pub answered_at: Option<Timestamp>,
}

impl Record for Rfi {
    fn id(&self) -> DbId {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRfi {
    pub project_id: DbId,
    pub subject: String,
    pub question: String,
    pub assignee_id: Option<DbId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRfi {
    pub answer: Option<String>,
    pub status: Option<RfiStatus>,
    pub assignee_id: Option<DbId>,
}
