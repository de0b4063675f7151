//! Match ranking.
//!
//! The bounding boxes used by the filter admit points up to ~7 km away on
//! the diagonal, so exact distances are computed here and anything beyond
//! the radius is dropped before sorting.

use serde::Serialize;

use crate::domain::{Coordinates, Journey};
use crate::geo::distance_between;

/// A journey that passed the candidate filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub journey: Journey,
    pub owner_first_name: String,
}

/// A ranked match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub journey: Journey,
    pub owner_first_name: String,

    /// Distance between the source origin and this journey's origin.
    pub origin_distance_km: f64,

    /// Distance between the source destination and this journey's destination.
    pub destination_distance_km: f64,
}

/// Compute exact distances, drop candidates beyond `radius_km` at either
/// end, and sort.
///
/// Matches are ordered by:
/// 1. Origin distance (closer is better)
/// 2. Journey id (for a stable order)
///
/// Candidates without coordinates are dropped.
pub fn rank_candidates(
    source_origin: Coordinates,
    source_destination: Coordinates,
    candidates: Vec<Candidate>,
    radius_km: f64,
) -> Vec<Match> {
    let mut matches: Vec<Match> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let (origin, destination) = candidate.journey.endpoints()?;
            Some(Match {
                origin_distance_km: distance_between(source_origin, origin),
                destination_distance_km: distance_between(source_destination, destination),
                journey: candidate.journey,
                owner_first_name: candidate.owner_first_name,
            })
        })
        .filter(|m| m.origin_distance_km <= radius_km && m.destination_distance_km <= radius_km)
        .collect();

    matches.sort_by(|a, b| {
        a.origin_distance_km
            .total_cmp(&b.origin_distance_km)
            .then_with(|| a.journey.journey_id.cmp(&b.journey.journey_id))
    });

    matches
}
