use groundwork_core::roles::Role;
use groundwork_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::Record;

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub company_id: DbId,
    pub created_at: Timestamp,
}

impl Record for User {
    fn id(&self) -> DbId {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InviteUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub company_id: DbId,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}
