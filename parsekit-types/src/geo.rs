//! Geographic points.

use crate::wire::{ToWire, WireValue};
use crate::{Error, Result};
use serde_json::json;

const EARTH_MEAN_RADIUS_KM: f64 = 6371.0;
const EARTH_MEAN_RADIUS_MILES: f64 = 3958.8;

/// A latitude/longitude pair in degrees.
///
/// Always within `[-90, 90]` latitude and `[-180, 180]` longitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Creates a point, validating both coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(Error::InvalidGeoPoint(
                "latitude and longitude must be finite numbers".to_string(),
            ));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::InvalidGeoPoint(format!(
                "latitude out of bounds: {latitude}"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::InvalidGeoPoint(format!(
                "longitude out of bounds: {longitude}"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in radians (haversine).
    #[must_use]
    pub fn radians_to(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let half_dlat = (lat1 - lat2) / 2.0;
        let half_dlon = (self.longitude.to_radians() - other.longitude.to_radians()) / 2.0;

        let a = half_dlat.sin().powi(2) + lat1.cos() * lat2.cos() * half_dlon.sin().powi(2);
        // Rounding can push `a` past 1.0 for antipodal points.
        2.0 * a.min(1.0).sqrt().asin()
    }

    /// Great-circle distance to `other` in kilometers.
    #[must_use]
    pub fn kilometers_to(&self, other: &GeoPoint) -> f64 {
        self.radians_to(other) * EARTH_MEAN_RADIUS_KM
    }

    /// Great-circle distance to `other` in miles.
    #[must_use]
    pub fn miles_to(&self, other: &GeoPoint) -> f64 {
        self.radians_to(other) * EARTH_MEAN_RADIUS_MILES
    }
}

impl ToWire for GeoPoint {
    fn to_wire(&self) -> WireValue {
        json!({
            "__type": "GeoPoint",
            "latitude": self.latitude,
            "longitude": self.longitude,
        })
    }
}
