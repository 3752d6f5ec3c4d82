pub mod audit;
pub mod daily_log;
pub mod document;
pub mod equipment;
pub mod error;
pub mod geo;
pub mod health;
pub mod links;
pub mod rfi;
pub mod roles;
pub mod safety;
pub mod settings;
pub mod timesheet;
pub mod todo;
pub mod trust;
pub mod types;
pub mod upload;
