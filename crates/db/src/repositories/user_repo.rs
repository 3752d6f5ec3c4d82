use chrono::Utc;
use groundwork_core::error::CoreError;
use groundwork_core::roles::validate_invite;
use groundwork_core::types::DbId;

use crate::models::user::{InviteUser, UpdateUser, User};
use crate::repositories::AssignmentRepo;
use crate::Store;

pub struct UserRepo;

impl UserRepo {
    pub fn find_by_id(store: &Store, id: DbId) -> Option<User> {
        store.users.get(id).cloned()
    }

    pub fn require(store: &Store, id: DbId) -> Result<User, CoreError> {
        store.users.require("User", id).cloned()
    }

    pub fn list_by_company(store: &Store, company_id: DbId) -> Vec<User> {
        store
            .users
            .iter()
            .filter(|u| u.company_id == company_id)
            .cloned()
            .collect()
    }

    /// Users assigned to the project.
    pub fn list_by_project(store: &Store, project_id: DbId) -> Vec<User> {
        let members = AssignmentRepo::member_ids(store, project_id);
        store
            .users
            .iter()
            .filter(|u| members.contains(&u.id))
            .cloned()
            .collect()
    }

    /// Field staff of the company not yet assigned to the project.
    pub fn list_unassigned(store: &Store, project_id: DbId, company_id: DbId) -> Vec<User> {
        let members = AssignmentRepo::member_ids(store, project_id);
        store
            .users
            .iter()
            .filter(|u| u.company_id == company_id && u.role.is_field_role())
            .filter(|u| !members.contains(&u.id))
            .cloned()
            .collect()
    }

    pub fn invite(store: &mut Store, input: &InviteUser) -> Result<User, CoreError> {
        validate_invite(&input.name, &input.email)?;
        store.companies.require("Company", input.company_id)?;
        let user = User {
            id: store.users.allocate_id(),
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            role: input.role,
            company_id: input.company_id,
            created_at: Utc::now(),
        };
        store.users.push_back(user.clone());
        Ok(user)
    }

    pub fn update(store: &mut Store, id: DbId, input: &UpdateUser) -> Result<User, CoreError> {
        let current = store.users.require("User", id)?;
        validate_invite(
            input.name.as_deref().unwrap_or(&current.name),
            input.email.as_deref().unwrap_or(&current.email),
        )?;
        let user = store.users.require_mut("User", id)?;
        if let Some(name) = &input.name {
            user.name = name.trim().to_string();
        }
        if let Some(email) = &input.email {
            user.email = email.trim().to_string();
        }
        if let Some(role) = input.role {
            user.role = role;
        }
        Ok(user.clone())
    }
}
