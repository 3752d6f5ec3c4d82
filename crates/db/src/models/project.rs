use groundwork_core::geo::{GeoPoint, Geofence};
use groundwork_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::models::site::Site;
use crate::Record;

/// Project as stored. Location and radius come from the site at read time.
#[derive(Debug, Clone)]
pub struct ProjectRow {
    pub id: DbId,
    pub name: String,
    pub site_id: DbId,
    pub company_id: DbId,
    pub manager_id: DbId,
    pub created_at: Timestamp,
}

impl Record for ProjectRow {
    fn id(&self) -> DbId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectLocation {
    /// The site's name.
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

/// A project enriched from its site.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub location: ProjectLocation,
    pub company_id: DbId,
    pub manager_id: DbId,
    pub radius: f64,
    pub site_id: DbId,
    pub created_at: Timestamp,
}

impl Project {
    pub fn enrich(row: &ProjectRow, site: &Site) -> Self {
        Self {
            id: row.id,
            name: row.name.clone(),
            location: ProjectLocation {
                address: site.name.clone(),
                lat: site.location.lat,
                lng: site.location.lng,
            },
            company_id: row.company_id,
            manager_id: row.manager_id,
            radius: site.radius,
            site_id: row.site_id,
            created_at: row.created_at,
        }
    }

    pub fn geofence(&self) -> Geofence {
        Geofence::new(GeoPoint::new(self.location.lat, self.location.lng), self.radius)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub site_id: DbId,
    pub company_id: DbId,
    pub manager_id: DbId,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub manager_id: Option<DbId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectAssignment {
    pub user_id: DbId,
    pub project_id: DbId,
}
