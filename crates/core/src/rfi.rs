//! Request-for-information workflow rules.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RfiStatus {
    Open,
    Answered,
    Closed,
}

pub fn validate_new(subject: &str, question: &str) -> Result<(), CoreError> {
    if subject.trim().is_empty() || question.trim().is_empty() {
        return Err(CoreError::Validation(
            "RFI subject and question are required".into(),
        ));
    }
    Ok(())
}

/// Whether `answer` should be recorded: only the first non-empty answer is.
pub fn accepts_answer(existing: Option<&str>, answer: Option<&str>) -> bool {
    existing.is_none() && answer.is_some_and(|a| !a.trim().is_empty())
}

/// An RFI that carries an answer cannot be reopened.
pub fn validate_status_change(answered: bool, requested: RfiStatus) -> Result<(), CoreError> {
    if answered && requested == RfiStatus::Open {
        return Err(CoreError::Conflict(
            "An answered RFI cannot be reopened".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_first_answer_is_recorded() {
        assert!(accepts_answer(None, Some("Use 5/8\" rebar")));
        assert!(!accepts_answer(Some("earlier"), Some("later")));
        assert!(!accepts_answer(None, Some("  ")));
        assert!(!accepts_answer(None, None));
    }

    #[test]
    fn answered_rfi_cannot_reopen() {
        assert!(validate_status_change(true, RfiStatus::Open).is_err());
        assert!(validate_status_change(true, RfiStatus::Closed).is_ok());
        assert!(validate_status_change(false, RfiStatus::Open).is_ok());
    }

    #[test]
    fn subject_and_question_required() {
        assert!(validate_new("", "why?").is_err());
        assert!(validate_new("Conduit", "Which path?").is_ok());
    }
}
