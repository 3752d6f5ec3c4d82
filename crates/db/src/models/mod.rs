//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `Serialize` entity struct as stored in the [`Store`](crate::Store)
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod audit;
pub mod company;
pub mod daily_log;
pub mod document;
pub mod equipment;
pub mod project;
pub mod rfi;
pub mod safety;
pub mod site;
pub mod timesheet;
pub mod todo;
pub mod user;
