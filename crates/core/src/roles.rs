//! Company roles.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    CompanyAdmin,
    ProjectManager,
    Foreman,
    SafetyOfficer,
    Operative,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Self::CompanyAdmin => "Company Admin",
            Self::ProjectManager => "Project Manager",
            Self::Foreman => "Foreman",
            Self::SafetyOfficer => "Safety Officer",
            Self::Operative => "Operative",
        }
    }

    /// Roles that work on site and can be assigned to projects.
    pub fn is_field_role(self) -> bool {
        matches!(self, Self::Foreman | Self::SafetyOfficer | Self::Operative)
    }
}

/// Validate invite details: non-empty name and a plausible email.
pub fn validate_invite(name: &str, email: &str) -> Result<(), crate::error::CoreError> {
    if name.trim().is_empty() {
        return Err(crate::error::CoreError::Validation(
            "User name must not be empty".into(),
        ));
    }
    if !email.contains('@') {
        return Err(crate::error::CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(())
}
