//! Great-circle distances and bounding boxes.
//!
//! Distances use the haversine formula on a spherical Earth. Bounding boxes
//! are the cheap pre-filter the store evaluates before exact distances are
//! computed.
//!
//! # Coordinate System
//!
//! - Latitude: degrees north (-90 to 90)
//! - Longitude: degrees east (-180 to 180)
//! - Distance: kilometres

use std::f64::consts::PI;

use serde::Serialize;

use crate::domain::Coordinates;

/// Earth's mean radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometres per degree of latitude used for bounding boxes.
const KM_PER_DEGREE: f64 = 111.0;

/// Degrees to radians conversion factor.
const DEG_TO_RAD: f64 = PI / 180.0;

/// Calculate the great-circle distance between two points in kilometres.
///
/// # Example
///
/// ```
/// use match_server::geo::distance_km;
///
/// // One degree of latitude is about 111 km
/// let dist = distance_km(0.0, 0.0, 1.0, 0.0);
/// assert!((dist - 111.19).abs() < 0.01);
/// ```
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1 * DEG_TO_RAD;
    let lat2_rad = lat2 * DEG_TO_RAD;
    let delta_lat = (lat2 - lat1) * DEG_TO_RAD;
    let delta_lon = (lon2 - lon1) * DEG_TO_RAD;

    // Haversine formula
    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1 for antipodal points
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}

/// Distance between two coordinate pairs in kilometres.
pub fn distance_between(from: Coordinates, to: Coordinates) -> f64 {
    distance_km(from.latitude, from.longitude, to.latitude, to.longitude)
}

/// An axis-aligned latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    /// Approximate a square of `radius_km` around `center`.
    ///
    /// The latitude delta is `radius / 111` and the longitude delta is
    /// `radius / (111 * cos(latitude))`. The box is meant for a single
    /// region: near the poles the longitude delta diverges, and it is
    /// clamped to 180 degrees so the box spans every longitude there.
    /// Boxes are not wrapped across the antimeridian.
    ///
    /// # Example
    ///
    /// ```
    /// use match_server::domain::Coordinates;
    /// use match_server::geo::BoundingBox;
    ///
    /// let center = Coordinates::new(54.99, -7.30);
    /// let bbox = BoundingBox::around(center, 5.0);
    /// assert!(bbox.contains(center));
    /// assert!(!bbox.contains(Coordinates::new(55.10, -7.30)));
    /// ```
    pub fn around(center: Coordinates, radius_km: f64) -> Self {
        let lat_delta = radius_km / KM_PER_DEGREE;

        let cos_lat = (center.latitude * DEG_TO_RAD).cos();
        let lon_delta = if cos_lat > 0.0 {
            (radius_km / (KM_PER_DEGREE * cos_lat)).min(180.0)
        } else {
            180.0
        };

        Self {
            min_latitude: center.latitude - lat_delta,
            max_latitude: center.latitude + lat_delta,
            min_longitude: center.longitude - lon_delta,
            max_longitude: center.longitude + lon_delta,
        }
    }

    /// Inclusive containment check.
    pub fn contains(&self, point: Coordinates) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&point.latitude)
            && (self.min_longitude..=self.max_longitude).contains(&point.longitude)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::offset_km;
    use super::*;

    fn derry() -> Coordinates {
        Coordinates::new(54.99, -7.30)
    }

    #[test]
    fn zero_distance() {
        assert_eq!(distance_km(54.99, -7.30, 54.99, -7.30), 0.0);
    }

    #[test]
    fn known_distance() {
        // Derry to Belfast is roughly 99 km as the crow flies
        let dist = distance_km(54.9966, -7.3086, 54.5973, -5.9301);
        assert!((dist - 98.0).abs() < 5.0, "got {dist}");
    }

    #[test]
    fn antipodal_points_do_not_nan() {
        let dist = distance_km(0.0, 0.0, 0.0, 180.0);
        assert!((dist - PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn offset_north_is_exact() {
        let moved = offset_km(derry(), 4.9, 0.0);
        let dist = distance_between(derry(), moved);
        assert!((dist - 4.9).abs() < 1e-9, "got {dist}");
    }

    #[test]
    fn bbox_contains_center_and_edges() {
        let bbox = BoundingBox::around(derry(), 5.0);
        assert!(bbox.contains(derry()));
        assert!(bbox.contains(Coordinates::new(bbox.max_latitude, bbox.min_longitude)));
        assert!(!bbox.contains(Coordinates::new(bbox.max_latitude + 1e-6, -7.30)));
    }

    #[test]
    fn bbox_deltas() {
        let bbox = BoundingBox::around(Coordinates::new(0.0, 0.0), 111.0);
        assert!((bbox.max_latitude - 1.0).abs() < 1e-12);
        assert!((bbox.max_longitude - 1.0).abs() < 1e-12);

        // Longitude delta widens away from the equator
        let north = BoundingBox::around(derry(), 5.0);
        let lat_span = north.max_latitude - north.min_latitude;
        let lon_span = north.max_longitude - north.min_longitude;
        assert!(lon_span > lat_span);
    }

    #[test]
    fn bbox_admits_diagonal_beyond_radius() {
        // The corners of the box lie outside the circle it approximates
        let corner = offset_km(derry(), 3.677, 3.677);
        let bbox = BoundingBox::around(derry(), 5.0);
        assert!(bbox.contains(corner));
        let dist = distance_between(derry(), corner);
        assert!(dist > 5.1 && dist < 5.3, "got {dist}");
    }

    #[test]
    fn bbox_at_pole_spans_all_longitudes() {
        let bbox = BoundingBox::around(Coordinates::new(90.0, 10.0), 5.0);
        assert!(bbox.max_longitude - bbox.min_longitude >= 360.0);
        assert!(bbox.contains(Coordinates::new(89.99, -170.0)));
    }
}
