//! Great-circle distance between points on the Earth's surface.

use serde::Serialize;

/// Mean Earth radius used for all distance calculations, in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another point, in miles.
    pub fn distance_to(&self, other: &Self) -> f64 {
        great_circle_miles(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

/// Haversine distance in miles between two coordinates given in degrees.
pub fn great_circle_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let delta_lat = (lat1 - lat2).abs();
    let delta_lon = (lon1.to_radians() - lon2.to_radians()).abs();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();
    EARTH_RADIUS_MILES * c
}
