//! Journeys offered or sought by users.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::time::{ClockTime, TimeError};
use super::{JourneyId, UserId};

/// A geocoded point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
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
}

/// A named end of a journey.
///
/// Latitude and longitude are stored together: a place is either fully
/// geocoded (picked from the address suggestions) or not geocoded at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub label: String,

    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

impl Place {
    /// A place picked from suggestions, with coordinates.
    pub fn geocoded(label: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            label: label.into(),
            coordinates: Some(Coordinates::new(latitude, longitude)),
        }
    }

    /// A place typed in free text, without coordinates.
    pub fn unresolved(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            coordinates: None,
        }
    }
}

/// A journey row.
///
/// `departing_at` and `must_arrive_at` keep the "HH:MM" strings the journey
/// screens stored; use [`Journey::departure_time`] to parse them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Journey {
    pub journey_id: JourneyId,

    /// The owning user.
    pub user_id: UserId,

    pub origin: Place,

    pub destination: Place,

    pub date: NaiveDate,

    pub departing_at: String,

    pub must_arrive_at: String,

    /// Free-form label maintained by the journey screens.
    pub status: String,
}

impl Journey {
    /// Parse the departure time.
    pub fn departure_time(&self) -> Result<ClockTime, TimeError> {
        ClockTime::parse_hhmm(&self.departing_at)
    }

    /// Origin and destination coordinates, if both ends are geocoded.
    pub fn endpoints(&self) -> Option<(Coordinates, Coordinates)> {
        Some((self.origin.coordinates?, self.destination.coordinates?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn journey(origin: Place, destination: Place) -> Journey {
        Journey {
            journey_id: JourneyId(1),
            user_id: UserId(1),
            origin,
            destination,
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            departing_at: "08:00".to_string(),
            must_arrive_at: "09:00".to_string(),
            status: "Pending".to_string(),
        }
    }

    #[test]
    fn endpoints_require_both_ends() {
        let full = journey(
            Place::geocoded("Derry", 54.99, -7.30),
            Place::geocoded("Letterkenny", 54.95, -7.73),
        );
        assert!(full.endpoints().is_some());

        let half = journey(
            Place::geocoded("Derry", 54.99, -7.30),
            Place::unresolved("Somewhere"),
        );
        assert!(half.endpoints().is_none());
    }

    #[test]
    fn departure_time_parses_stored_string() {
        let mut j = journey(Place::unresolved("A"), Place::unresolved("B"));
        assert_eq!(j.departure_time().unwrap().minutes_since_midnight(), 480);

        j.departing_at = "8am".to_string();
        assert!(j.departure_time().is_err());
    }

    #[test]
    fn missing_coordinates_deserialize_as_none() {
        let json = r#"{ "label": "Main Street" }"#;
        let place: Place = serde_json::from_str(json).unwrap();
        assert_eq!(place, Place::unresolved("Main Street"));
    }
}
