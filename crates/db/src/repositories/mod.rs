//! Repository layer.
//!
//! Each repository is a zero-sized struct with associated functions that
//! borrow the [`Store`](crate::Store). Reads take `&Store`, mutations take
//! `&mut Store`; errors are [`CoreError`](groundwork_core::error::CoreError).

pub mod audit_repo;
pub mod company_repo;
pub mod daily_log_repo;
pub mod document_repo;
pub mod equipment_repo;
pub mod health_repo;
pub mod project_repo;
pub mod rfi_repo;
pub mod safety_repo;
pub mod timesheet_repo;
pub mod todo_repo;
pub mod user_repo;

pub use audit_repo::AuditRepo;
pub use company_repo::{CompanyRepo, SiteRepo};
pub use daily_log_repo::DailyLogRepo;
pub use document_repo::{AcknowledgementRepo, DocumentRepo};
pub use equipment_repo::{EquipmentRepo, ResourceRepo};
pub use health_repo::HealthRepo;
pub use project_repo::{AssignmentRepo, ProjectRepo};
pub use rfi_repo::RfiRepo;
pub use safety_repo::SafetyRepo;
pub use timesheet_repo::TimesheetRepo;
pub use todo_repo::TodoRepo;
pub use user_repo::UserRepo;
