//! Query gateway over the journey database.
//!
//! The matcher and the request lifecycle never talk to storage directly;
//! they go through the [`Store`] trait. Implementations must make each call
//! atomic with respect to other writers: in particular
//! [`Store::insert_request`] checks for a duplicate and inserts in one step,
//! and [`Store::transition_status`] is a compare-and-set on the status
//! column.

mod error;
mod memory;
mod seed;
mod users;

use std::collections::HashSet;
use std::future::Future;

use chrono::NaiveDate;

use crate::domain::{Journey, JourneyId, NewRequest, Request, RequestId, RequestStatus, User, UserId};
use crate::geo::BoundingBox;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use seed::Seed;
pub use users::{CacheConfig, UserDirectory};

/// Storage-level narrowing for candidate journeys.
///
/// These are the constraints cheap enough to evaluate inside the store.
/// A store may return a superset; the matcher re-checks every rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateQuery {
    /// Journeys owned by this user are skipped.
    pub exclude_owner: UserId,

    pub date: NaiveDate,

    pub origin_box: BoundingBox,

    pub destination_box: BoundingBox,
}

impl CandidateQuery {
    /// Whether a journey satisfies every constraint in the query.
    pub fn admits(&self, journey: &Journey) -> bool {
        if journey.user_id == self.exclude_owner || journey.date != self.date {
            return false;
        }

        match journey.endpoints() {
            Some((origin, destination)) => {
                self.origin_box.contains(origin) && self.destination_box.contains(destination)
            }
            None => false,
        }
    }
}

/// Result of inserting a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The request was stored under this id.
    Inserted(RequestId),

    /// A request from the same requester for the same journey already exists.
    Duplicate(RequestId),
}

/// Result of a conditional status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The status matched and was replaced.
    Applied,

    /// The status did not match; nothing was written.
    Rejected { current: RequestStatus },

    /// No request with that id exists.
    Missing,
}

/// Read and write access to users, journeys and requests.
///
/// Users and journeys are read-only here; they are written by the
/// account and journey screens.
pub trait Store: Send + Sync {
    /// Look up a user.
    fn user(&self, id: UserId) -> impl Future<Output = Result<Option<User>, StoreError>> + Send;

    /// Look up a journey.
    fn journey(
        &self,
        id: JourneyId,
    ) -> impl Future<Output = Result<Option<Journey>, StoreError>> + Send;

    /// Journeys that satisfy the storage-level part of the candidate filter.
    fn candidate_journeys(
        &self,
        query: CandidateQuery,
    ) -> impl Future<Output = Result<Vec<Journey>, StoreError>> + Send;

    /// Ids of every journey the user has a request against, in any status.
    fn requested_journeys(
        &self,
        requester: UserId,
    ) -> impl Future<Output = Result<HashSet<JourneyId>, StoreError>> + Send;

    /// Look up a request.
    fn request(
        &self,
        id: RequestId,
    ) -> impl Future<Output = Result<Option<Request>, StoreError>> + Send;

    /// Store a new `Pending` request unless the requester already has one
    /// for the same journey.
    fn insert_request(
        &self,
        request: NewRequest,
    ) -> impl Future<Output = Result<InsertOutcome, StoreError>> + Send;

    /// Set the status to `to` only if it is currently `from`.
    fn transition_status(
        &self,
        id: RequestId,
        from: RequestStatus,
        to: RequestStatus,
    ) -> impl Future<Output = Result<TransitionOutcome, StoreError>> + Send;

    /// Delete a request. Returns `false` if it did not exist.
    fn delete_request(&self, id: RequestId)
    -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Requests addressed to a user, newest first.
    fn requests_for_recipient(
        &self,
        recipient: UserId,
    ) -> impl Future<Output = Result<Vec<Request>, StoreError>> + Send;

    /// Requests sent by a user, newest first.
    fn requests_by_requester(
        &self,
        requester: UserId,
    ) -> impl Future<Output = Result<Vec<Request>, StoreError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinates, Place};

    fn journey(owner: u64, date: NaiveDate, origin: (f64, f64), dest: (f64, f64)) -> Journey {
        Journey {
            journey_id: JourneyId(1),
            user_id: UserId(owner),
            origin: Place::geocoded("A", origin.0, origin.1),
            destination: Place::geocoded("B", dest.0, dest.1),
            date,
            departing_at: "08:00".to_string(),
            must_arrive_at: "09:00".to_string(),
            status: "Pending".to_string(),
        }
    }

    fn query(date: NaiveDate) -> CandidateQuery {
        CandidateQuery {
            exclude_owner: UserId(1),
            date,
            origin_box: BoundingBox::around(Coordinates::new(54.99, -7.30), 5.0),
            destination_box: BoundingBox::around(Coordinates::new(54.95, -7.73), 5.0),
        }
    }

    #[test]
    fn query_admits_nearby_journey_on_same_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let q = query(date);
        assert!(q.admits(&journey(2, date, (54.99, -7.30), (54.95, -7.73))));
    }

    #[test]
    fn query_rejects_owner_date_and_distance() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let q = query(date);

        assert!(!q.admits(&journey(1, date, (54.99, -7.30), (54.95, -7.73))));
        assert!(!q.admits(&journey(
            2,
            date.succ_opt().unwrap(),
            (54.99, -7.30),
            (54.95, -7.73)
        )));
        assert!(!q.admits(&journey(2, date, (55.50, -7.30), (54.95, -7.73))));
        assert!(!q.admits(&journey(2, date, (54.99, -7.30), (54.95, -6.50))));
    }

    #[test]
    fn query_rejects_unresolved_places() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let mut j = journey(2, date, (54.99, -7.30), (54.95, -7.73));
        j.destination = Place::unresolved("Somewhere");
        assert!(!query(date).admits(&j));
    }
}
