//! Companies, their settings, and sites.

use chrono::Utc;
use groundwork_core::error::CoreError;
use groundwork_core::geo::{validate_point, validate_radius};
use groundwork_core::settings::validate_retention_days;
use groundwork_core::types::DbId;

use crate::models::company::{Company, CompanySettings, UpdateCompanySettings};
use crate::models::site::{CreateSite, Site};
use crate::Store;

// ---------------------------------------------------------------------------
// CompanyRepo
// ---------------------------------------------------------------------------

pub struct CompanyRepo;

impl CompanyRepo {
    pub fn list(store: &Store) -> Vec<Company> {
        store.companies.iter().cloned().collect()
    }

    pub fn find_settings(store: &Store, company_id: DbId) -> Result<CompanySettings, CoreError> {
        store
            .company_settings
            .iter()
            .find(|s| s.company_id == company_id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("CompanySettings", company_id))
    }

    /// Apply a partial update; notification preferences are merged.
    pub fn update_settings(
        store: &mut Store,
        company_id: DbId,
        input: &UpdateCompanySettings,
    ) -> Result<CompanySettings, CoreError> {
        if let Some(days) = input.timesheet_retention_days {
            validate_retention_days(days)?;
        }
        let settings_id = Self::find_settings(store, company_id)?.id;
        let settings = store.company_settings.require_mut("CompanySettings", settings_id)?;

        if let Some(days) = input.timesheet_retention_days {
            settings.timesheet_retention_days = days;
        }
        if let Some(theme) = input.theme {
            settings.theme = Some(theme);
        }
        if let Some(prefs) = &input.notification_preferences {
            settings.notification_preferences.merge(prefs);
        }
        Ok(settings.clone())
    }
}

// ---------------------------------------------------------------------------
// SiteRepo
// ---------------------------------------------------------------------------

pub struct SiteRepo;

impl SiteRepo {
    pub fn create(store: &mut Store, input: &CreateSite) -> Result<Site, CoreError> {
        if input.name.trim().is_empty() {
            return Err(CoreError::Validation("Site name must not be empty".into()));
        }
        validate_point(&input.location)?;
        validate_radius(input.radius)?;
        store.companies.require("Company", input.company_id)?;

        let site = Site {
            id: store.sites.allocate_id(),
            name: input.name.trim().to_string(),
            location: input.location,
            radius: input.radius,
            company_id: input.company_id,
            created_at: Utc::now(),
        };
        store.sites.push_back(site.clone());
        Ok(site)
    }

    pub fn list_by_company(store: &Store, company_id: DbId) -> Vec<Site> {
        store
            .sites
            .iter()
            .filter(|s| s.company_id == company_id)
            .cloned()
            .collect()
    }
}
