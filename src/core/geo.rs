use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Web Mercator projection constants
const EARTH_RADIUS: f64 = 6378137.0;
const MAX_LATITUDE: f64 = 85.0511287798;

/// Half the width of the Web Mercator world square, in metres.
pub const MERCATOR_EXTENT: f64 = PI * EARTH_RADIUS;

/// Ground resolution (metres per pixel) at zoom 0 for 256px tiles.
const RESOLUTION_Z0: f64 = 2.0 * MERCATOR_EXTENT / 256.0;

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Clamps latitude to the range Web Mercator can represent
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }

    /// Converts to Web Mercator projection (EPSG:3857)
    pub fn to_mercator(&self) -> Point {
        let lat = Self::clamp_lat(self.lat);
        let x = self.lng.to_radians() * EARTH_RADIUS;
        let y = ((PI / 4.0 + lat.to_radians() / 2.0).tan().ln()) * EARTH_RADIUS;
        Point::new(x, y)
    }
}

/// A coordinate in map space (EPSG:3857 metres) or, for pixel offsets,
/// in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

/// Metres per screen pixel at the given zoom level.
pub fn resolution_at(zoom: f64) -> f64 {
    RESOLUTION_Z0 / 2_f64.powf(zoom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latitude_clamped_to_mercator_range() {
        assert_eq!(LatLng::clamp_lat(90.0), MAX_LATITUDE);
        assert_eq!(LatLng::clamp_lat(-90.0), -MAX_LATITUDE);
        assert_eq!(LatLng::clamp_lat(45.0), 45.0);
        assert!(LatLng::new(90.0, 0.0).to_mercator().is_finite());
    }

    #[test]
    fn test_mercator_origin() {
        let origin = LatLng::new(0.0, 0.0).to_mercator();
        assert!(origin.x.abs() < 1e-9);
        assert!(origin.y.abs() < 1e-9);
    }

    #[test]
    fn test_mercator_edges() {
        let east = LatLng::new(0.0, 180.0).to_mercator();
        assert!((east.x - MERCATOR_EXTENT).abs() < 1e-6);
        let north = LatLng::new(MAX_LATITUDE, 0.0).to_mercator();
        assert!((north.y - MERCATOR_EXTENT).abs() < 1.0);
    }

    #[test]
    fn test_resolution_halves_per_zoom() {
        let z2 = resolution_at(2.0);
        let z3 = resolution_at(3.0);
        assert!((z2 / z3 - 2.0).abs() < 1e-12);
        assert!((resolution_at(0.0) * 256.0 - 2.0 * MERCATOR_EXTENT).abs() < 1e-6);
    }
}
