use crate::types::DbId;

/// Domain error shared by every layer.
///
/// The taxonomy is intentionally shallow: lookups that miss, input that
/// fails validation, and operations attempted from the wrong state.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The entity exists but is not in a state that allows the operation.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`].
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        Self::NotFound { entity, id }
    }
}
