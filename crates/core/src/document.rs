//! Document lifecycle, versioning and access-URL rules.
//!
//! Uploads with the same name in the same project form a version lineage
//! identified by `document_group_id` (the id of the first upload). Versions in
//! a group are `1..=N` with no gaps; a revert clones an old version into a new
//! top version and never rewrites history.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Indexed content stored on a document that failed its security scan.
pub const QUARANTINE_NOTICE: &str = "File quarantined due to security scan. Content not indexed.";

/// Access URL handed out for approved PDF files.
pub const SAMPLE_PDF_URL: &str =
    "https://www.w3.org/WAI/ER/tests/xhtml/testfiles/resources/pdf/dummy.pdf";

/// Access URL handed out for approved images.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/800x600.png";

/// URL of a document with no resolvable preview.
pub const UNRESOLVED_URL: &str = "#";

/// Maximum accepted length of a document name.
pub const MAX_NAME_LEN: usize = 255;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// `Uploading -> Scanning -> Approved | Quarantined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Uploading,
    Scanning,
    Approved,
    Quarantined,
}

impl DocumentStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Uploading => "Uploading",
            Self::Scanning => "Scanning",
            Self::Approved => "Approved",
            Self::Quarantined => "Quarantined",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    RiskAssessment,
    HealthAndSafety,
    CompanyPolicy,
    Blueprint,
    General,
    Other,
}

impl DocumentCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::RiskAssessment => "Risk Assessment / Method Statement",
            Self::HealthAndSafety => "Health & Safety",
            Self::CompanyPolicy => "Company Policy",
            Self::Blueprint => "Blueprint / Drawing",
            Self::General => "General",
            Self::Other => "Other",
        }
    }
}

// ---------------------------------------------------------------------------
// Versioning
// ---------------------------------------------------------------------------

/// Next version number for a group given the versions already in it.
pub fn next_version(existing: impl IntoIterator<Item = i32>) -> i32 {
    existing.into_iter().max().unwrap_or(0) + 1
}

/// Target description recorded when a version is reverted.
pub fn revert_description(name: &str, reverted_version: i32) -> String {
    format!("{name} (reverted to v{reverted_version})")
}

// ---------------------------------------------------------------------------
// Upload / scan outcome
// ---------------------------------------------------------------------------

pub fn validate_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Document name must not be empty".into()));
    }
    if trimmed.len() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Document name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Guard for operations only valid while the file is still being uploaded.
pub fn ensure_uploading(status: DocumentStatus) -> Result<(), CoreError> {
    if status == DocumentStatus::Uploading {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Document is {} and not in a valid state for upload",
            status.label()
        )))
    }
}

/// Placeholder index text used when summarisation is unavailable.
pub fn fallback_index_content(name: &str, category: DocumentCategory) -> String {
    format!("Content indexing for {name}. Category: {}.", category.label())
}

/// Access URL for an approved document, chosen by file extension.
pub fn resolve_access_url(name: &str) -> &'static str {
    if name.ends_with(".pdf") {
        SAMPLE_PDF_URL
    } else if name.ends_with(".png") || name.ends_with(".jpg") {
        PLACEHOLDER_IMAGE_URL
    } else {
        UNRESOLVED_URL
    }
}

/// Reject linking a document to itself.
pub fn ensure_distinct(source_id: DbId, target_id: DbId) -> Result<(), CoreError> {
    if source_id == target_id {
        return Err(CoreError::Validation(
            "A document cannot be linked to itself".into(),
        ));
    }
    Ok(())
}
