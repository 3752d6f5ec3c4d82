//! Great-circle distance and site geofences.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Mean Earth radius in metres used by the haversine formula.
pub const EARTH_RADIUS_M: f64 = 6371e3;

/// A WGS-84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to `other` in metres (haversine).
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        haversine_distance_m(self, other)
    }
}

/// A circular site boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geofence {
    pub center: GeoPoint,
    /// Radius in metres.
    pub radius_m: f64,
}

impl Geofence {
    pub fn new(center: GeoPoint, radius_m: f64) -> Self {
        Self { center, radius_m }
    }

    /// Metres by which `point` lies outside the fence, or `None` when inside
    /// (a point exactly on the boundary counts as inside).
    pub fn overshoot_m(&self, point: &GeoPoint) -> Option<f64> {
        let distance = self.center.distance_to(point);
        (distance > self.radius_m).then(|| distance - self.radius_m)
    }
}

/// Haversine distance between two points in metres.
pub fn haversine_distance_m(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lng - a.lng).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Validate latitude/longitude ranges.
pub fn validate_point(point: &GeoPoint) -> Result<(), CoreError> {
    if !point.lat.is_finite() || !(-90.0..=90.0).contains(&point.lat) {
        return Err(CoreError::Validation(format!(
            "Latitude {} must be between -90 and 90",
            point.lat
        )));
    }
    if !point.lng.is_finite() || !(-180.0..=180.0).contains(&point.lng) {
        return Err(CoreError::Validation(format!(
            "Longitude {} must be between -180 and 180",
            point.lng
        )));
    }
    Ok(())
}

/// Validate a geofence radius (finite and strictly positive).
pub fn validate_radius(radius_m: f64) -> Result<(), CoreError> {
    if !radius_m.is_finite() || radius_m <= 0.0 {
        return Err(CoreError::Validation(
            "Geofence radius must be a positive number of metres".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Metres per degree of latitude on the haversine sphere.
    const M_PER_DEG_LAT: f64 = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;

    #[test]
    fn same_point_has_zero_distance() {
        let p = GeoPoint::new(34.0522, -118.2437);
        assert_eq!(haversine_distance_m(&p, &p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(1.0, 0.0);
        let d = haversine_distance_m(&a, &b);
        assert!((d - M_PER_DEG_LAT).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPoint::new(34.0522, -118.2437);
        let b = GeoPoint::new(33.7701, -118.1937);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-9);
    }

    #[test]
    fn overshoot_none_inside_fence() {
        let fence = Geofence::new(GeoPoint::new(34.0522, -118.2437), 250.0);
        assert!(fence.overshoot_m(&GeoPoint::new(34.0522, -118.2437)).is_none());
    }

    #[test]
    fn overshoot_reports_excess_distance() {
        let center = GeoPoint::new(34.0522, -118.2437);
        let fence = Geofence::new(center, 250.0);
        let outside = GeoPoint::new(center.lat + 500.0 / M_PER_DEG_LAT, center.lng);
        let over = fence.overshoot_m(&outside).unwrap();
        assert!((over - 250.0).abs() < 0.01, "got {over}");
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        assert!(validate_point(&GeoPoint::new(91.0, 0.0)).is_err());
        assert!(validate_point(&GeoPoint::new(f64::NAN, 0.0)).is_err());
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        assert!(validate_point(&GeoPoint::new(0.0, -180.5)).is_err());
    }

    #[test]
    fn accepts_valid_point() {
        assert!(validate_point(&GeoPoint::new(-33.86, 151.2)).is_ok());
    }

    #[test]
    fn radius_must_be_positive() {
        assert!(validate_radius(0.0).is_err());
        assert!(validate_radius(-5.0).is_err());
        assert!(validate_radius(250.0).is_ok());
    }
}
