//! Hard constraints on candidate journeys.
//!
//! A candidate is another user's journey that could be shared with the
//! source journey. Every rule here must pass; the order only matters for
//! which [`Rejection`] is reported.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use crate::domain::{ClockTime, Journey, JourneyId, User};
use crate::geo::BoundingBox;
use crate::store::CandidateQuery;

use super::config::MatchConfig;
use super::matcher::MatchError;

/// Why a candidate journey was filtered out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("journey belongs to the acting user")]
    OwnJourney,

    #[error("journey is on a different date")]
    DifferentDate,

    #[error("owner does not drive")]
    OwnerCannotDrive,

    #[error("smoking preferences differ")]
    SmokingMismatch,

    #[error("same-gender preferences differ")]
    GenderPreferenceMismatch,

    #[error("owner gender does not match")]
    GenderMismatch,

    #[error("departure is {minutes} minutes away")]
    DepartureTooFar { minutes: i64 },

    #[error("departure time {0:?} cannot be parsed")]
    UnparseableDeparture(String),

    #[error("journey is not geocoded")]
    MissingCoordinates,

    #[error("origin is outside the search area")]
    OriginOutOfRange,

    #[error("destination is outside the search area")]
    DestinationOutOfRange,

    #[error("acting user already requested this journey")]
    AlreadyRequested,
}

/// Candidate filter prepared for one source journey and acting user.
#[derive(Debug, Clone)]
pub struct CandidateFilter {
    acting_user: Arc<User>,
    date: NaiveDate,
    departure: ClockTime,
    time_window: Duration,
    origin_box: BoundingBox,
    destination_box: BoundingBox,
    already_requested: HashSet<JourneyId>,
}

impl CandidateFilter {
    /// Prepare the filter.
    ///
    /// Fails if the source journey is not geocoded at both ends or its
    /// departure time cannot be parsed.
    pub fn new(
        source: &Journey,
        acting_user: Arc<User>,
        already_requested: HashSet<JourneyId>,
        config: &MatchConfig,
    ) -> Result<Self, MatchError> {
        let (origin, destination) = source
            .endpoints()
            .ok_or(MatchError::MissingCoordinates(source.journey_id))?;

        let departure = source
            .departure_time()
            .map_err(|e| MatchError::InvalidTime {
                journey: source.journey_id,
                source: e,
            })?;

        Ok(Self {
            acting_user,
            date: source.date,
            departure,
            time_window: config.time_window(),
            origin_box: BoundingBox::around(origin, config.radius_km),
            destination_box: BoundingBox::around(destination, config.radius_km),
            already_requested,
        })
    }

    /// The storage-level part of this filter.
    pub fn query(&self) -> CandidateQuery {
        CandidateQuery {
            exclude_owner: self.acting_user.user_id,
            date: self.date,
            origin_box: self.origin_box,
            destination_box: self.destination_box,
        }
    }

    /// Check every rule against a candidate and its owner.
    pub fn check(&self, candidate: &Journey, owner: &User) -> Result<(), Rejection> {
        let acting = &*self.acting_user;

        if candidate.user_id == acting.user_id {
            return Err(Rejection::OwnJourney);
        }

        if candidate.date != self.date {
            return Err(Rejection::DifferentDate);
        }

        check_preferences(acting, owner)?;

        let departure = candidate
            .departure_time()
            .map_err(|_| Rejection::UnparseableDeparture(candidate.departing_at.clone()))?;
        let delta = departure.abs_diff(self.departure);
        if delta > self.time_window {
            return Err(Rejection::DepartureTooFar {
                minutes: delta.num_minutes(),
            });
        }

        let (origin, destination) = candidate
            .endpoints()
            .ok_or(Rejection::MissingCoordinates)?;
        if !self.origin_box.contains(origin) {
            return Err(Rejection::OriginOutOfRange);
        }
        if !self.destination_box.contains(destination) {
            return Err(Rejection::DestinationOutOfRange);
        }

        if self.already_requested.contains(&candidate.journey_id) {
            return Err(Rejection::AlreadyRequested);
        }

        Ok(())
    }
}

/// Owner capability and the smoking and gender preferences.
///
/// Preferences must match exactly: a non-smoker is not matched with a
/// smoker, and a smoker is not matched with a non-smoker either.
fn check_preferences(acting: &User, owner: &User) -> Result<(), Rejection> {
    if !owner.can_drive {
        return Err(Rejection::OwnerCannotDrive);
    }

    if owner.smoking_allowed != acting.smoking_allowed {
        return Err(Rejection::SmokingMismatch);
    }

    if owner.prefers_same_gender != acting.prefers_same_gender {
        return Err(Rejection::GenderPreferenceMismatch);
    }

    if acting.prefers_same_gender && owner.gender != acting.gender {
        return Err(Rejection::GenderMismatch);
    }

    Ok(())
}
