use groundwork_core::geo::{GeoPoint, Geofence};
use groundwork_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::Record;

/// A physical site with its geofence.
#[derive(Debug, Clone, Serialize)]
pub struct Site {
    pub id: DbId,
    pub name: String,
    pub location: GeoPoint,
    /// Geofence radius in metres.
    pub radius: f64,
    pub company_id: DbId,
    pub created_at: Timestamp,
}

impl Site {
    pub fn geofence(&self) -> Geofence {
        Geofence::new(self.location, self.radius)
    }
}

impl Record for Site {
    fn id(&self) -> DbId {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSite {
    pub name: String,
    pub location: GeoPoint,
    pub radius: f64,
    pub company_id: DbId,
}
