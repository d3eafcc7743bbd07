//! Great-circle geometry shared by the search pipeline and the directory.
//!
//! Every distance in the system goes through [`haversine_meters`], whether it
//! is evaluated in-process after a fetch or used to size a SQL pre-filter.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Extra slack applied to pre-filter boxes so float error never trims a match.
const BOUNDS_MARGIN: f64 = 1.01;

/// A validated (latitude, longitude) pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = ValidationError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// Build a coordinate, rejecting non-finite or out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidLatitude`] or
    /// [`ValidationError::InvalidLongitude`] when a component is out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Great-circle distance between two coordinates in meters.
#[must_use]
pub fn haversine_meters(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `h` a hair past 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Haversine distance rounded to whole meters, as exposed in search results.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn distance_meters(a: Coordinate, b: Coordinate) -> u32 {
    // Half the equator is ~20,015 km, well inside u32.
    haversine_meters(a, b).round() as u32
}

/// Latitude/longitude rectangle used as a cheap directory pre-filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Smallest lat/lon box that is guaranteed to contain every point within
    /// `radius_meters` of `origin`, padded by a small margin.
    ///
    /// Returns `None` when the circle touches a pole or crosses the
    /// antimeridian. A single rectangle cannot describe those regions, so
    /// callers fall back to filtering on distance alone.
    #[must_use]
    pub fn around(origin: Coordinate, radius_meters: u32) -> Option<Self> {
        // One extra meter covers candidates that round down onto the radius.
        let angular = (f64::from(radius_meters) + 1.0) / EARTH_RADIUS_METERS * BOUNDS_MARGIN;
        let lat_delta = angular.to_degrees();

        let min_lat = origin.latitude - lat_delta;
        let max_lat = origin.latitude + lat_delta;
        if min_lat <= -90.0 || max_lat >= 90.0 {
            return None;
        }

        // Longitude of the meridians tangent to the circle.
        let ratio = angular.sin() / origin.latitude.to_radians().cos();
        if ratio >= 1.0 {
            return None;
        }
        let lon_delta = ratio.asin().to_degrees() * BOUNDS_MARGIN;

        let min_lon = origin.longitude - lon_delta;
        let max_lon = origin.longitude + lon_delta;
        if min_lon < -180.0 || max_lon > 180.0 {
            return None;
        }

        Some(Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        })
    }

    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.latitude)
            && (self.min_lon..=self.max_lon).contains(&point.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).expect("valid coordinate")
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let d = haversine_meters(coord(0.0, 0.0), coord(0.0, 1.0));
        assert!((d - 111_195.0).abs() < 111_195.0 * 0.01, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (coord(-33.4489, -70.6693), coord(-33.4372, -70.6506)),
            (coord(51.5074, -0.1278), coord(40.7128, -74.0060)),
            (coord(89.9, 179.9), coord(-89.9, -179.9)),
            (coord(0.0, 0.0), coord(0.0, 180.0)),
        ];
        for (a, b) in pairs {
            let ab = haversine_meters(a, b);
            let ba = haversine_meters(b, a);
            assert!((ab - ba).abs() < 1e-6, "{ab} != {ba}");
        }
    }

    #[test]
    fn same_point_is_zero() {
        let santiago = coord(-33.4489, -70.6693);
        assert_eq!(distance_meters(santiago, santiago), 0);
    }

    #[test]
    fn antipodal_points_are_half_circumference() {
        let d = haversine_meters(coord(0.0, 0.0), coord(0.0, 180.0));
        let expected = std::f64::consts::PI * EARTH_RADIUS_METERS;
        assert!((d - expected).abs() < 1.0);
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        assert_eq!(
            Coordinate::new(90.5, 0.0),
            Err(ValidationError::InvalidLatitude(90.5))
        );
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        assert_eq!(
            Coordinate::new(0.0, -180.01),
            Err(ValidationError::InvalidLongitude(-180.01))
        );
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn accepts_boundary_values() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn deserialize_validates_range() {
        let ok: Result<Coordinate, _> =
            serde_json::from_str(r#"{"latitude": -33.4, "longitude": -70.6}"#);
        assert!(ok.is_ok());
        let bad: Result<Coordinate, _> =
            serde_json::from_str(r#"{"latitude": 123.0, "longitude": 0.0}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn bounding_box_contains_points_on_the_circle() {
        let origin = coord(-33.4489, -70.6693);
        let radius = 5_000;
        let bounds = BoundingBox::around(origin, radius).expect("box");

        // Walk the compass and place a point just inside the radius each way.
        let angular = f64::from(radius) / EARTH_RADIUS_METERS;
        for step in 0..36 {
            let bearing = f64::from(step) * 10.0_f64.to_radians();
            let lat1 = origin.latitude().to_radians();
            let lon1 = origin.longitude().to_radians();
            let lat2 =
                (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
            let lon2 = lon1
                + (bearing.sin() * angular.sin() * lat1.cos())
                    .atan2(angular.cos() - lat1.sin() * lat2.sin());
            let point = coord(lat2.to_degrees(), lon2.to_degrees());
            assert!(distance_meters(origin, point) <= radius);
            assert!(bounds.contains(point), "bearing {step}0 escaped the box");
        }
    }

    #[test]
    fn bounding_box_skipped_near_pole() {
        assert!(BoundingBox::around(coord(89.99, 0.0), 5_000).is_none());
        assert!(BoundingBox::around(coord(-89.99, 0.0), 5_000).is_none());
    }

    #[test]
    fn bounding_box_skipped_across_antimeridian() {
        assert!(BoundingBox::around(coord(0.0, 179.99), 5_000).is_none());
        assert!(BoundingBox::around(coord(0.0, -179.99), 5_000).is_none());
    }
}
