use groundwork_core::daily_log::Weather;
use groundwork_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::Record;

#[derive(Debug, Clone, Serialize)]
pub struct DailyLog {
    pub id: DbId,
    pub project_id: DbId,
    pub author_id: DbId,
    pub date: Timestamp,
    pub weather: Weather,
    /// Degrees Celsius.
    pub temperature: f64,
    pub notes: String,
}

impl Record for DailyLog {
    fn id(&self) -> DbId {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDailyLog {
    pub project_id: DbId,
    pub date: Timestamp,
    pub weather: Weather,
    pub temperature: f64,
    pub notes: String,
}
