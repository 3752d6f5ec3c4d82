use groundwork_core::daily_log::validate_entry;
use groundwork_core::error::CoreError;
use groundwork_core::types::DbId;

use crate::models::daily_log::{CreateDailyLog, DailyLog};
use crate::Store;

pub struct DailyLogRepo;

impl DailyLogRepo {
    pub fn create(
        store: &mut Store,
        input: &CreateDailyLog,
        author_id: DbId,
    ) -> Result<DailyLog, CoreError> {
        validate_entry(input.temperature, &input.notes)?;
        store.projects.require("Project", input.project_id)?;
        let log = DailyLog {
            id: store.daily_logs.allocate_id(),
            project_id: input.project_id,
            author_id,
            date: input.date,
            weather: input.weather,
            temperature: input.temperature,
            notes: input.notes.trim().to_string(),
        };
        store.daily_logs.push_front(log.clone());
        Ok(log)
    }

    /// Logs of a project, latest date first.
    pub fn list_by_project(store: &Store, project_id: DbId) -> Vec<DailyLog> {
        let mut logs: Vec<DailyLog> = store
            .daily_logs
            .iter()
            .filter(|l| l.project_id == project_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.date.cmp(&a.date));
        logs
    }
}
