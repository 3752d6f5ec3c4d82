//! Request handlers.
//!
//! Each submodule provides async handler functions for one area of the
//! dashboard. Handlers delegate to the repositories in `groundwork_db`, call
//! the assistant with no store lock held, and map errors via
//! [`AppError`](crate::error::AppError).

pub mod audit;
pub mod company;
pub mod daily_log;
pub mod document;
pub mod equipment;
pub mod project;
pub mod rfi;
pub mod safety;
pub mod timesheet;
pub mod todo;
pub mod user;
