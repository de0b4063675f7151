//! Match search for a source journey.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, trace, warn};

use crate::domain::{JourneyId, TimeError, User, UserId};
use crate::error::ErrorKind;
use crate::store::{Store, StoreError};

use super::config::MatchConfig;
use super::filter::CandidateFilter;
use super::rank::{Candidate, Match, rank_candidates};

/// Error from match search.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// The source journey does not exist.
    #[error("journey {0} not found")]
    SourceNotFound(JourneyId),

    /// The acting user does not exist.
    #[error("user {0} not found")]
    UserNotFound(UserId),

    /// The source journey was not picked from address suggestions.
    #[error("journey {0} is missing origin or destination coordinates")]
    MissingCoordinates(JourneyId),

    /// The source journey's departure time cannot be parsed.
    #[error("journey {journey} has an invalid departure time: {source}")]
    InvalidTime {
        journey: JourneyId,
        source: TimeError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl MatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatchError::SourceNotFound(_) | MatchError::UserNotFound(_) => ErrorKind::NotFound,
            MatchError::MissingCoordinates(_) | MatchError::InvalidTime { .. } => {
                ErrorKind::PreconditionFailed
            }
            MatchError::Store(_) => ErrorKind::Storage,
        }
    }
}

/// Finds and ranks journeys compatible with a source journey.
///
/// User rows feed the preference rules, so they are read from the store on
/// every search rather than through the cached user directory.
pub struct Matcher<'a, S> {
    store: &'a S,
    config: &'a MatchConfig,
}

impl<'a, S: Store> Matcher<'a, S> {
    /// Create a new matcher.
    pub fn new(store: &'a S, config: &'a MatchConfig) -> Self {
        Self { store, config }
    }

    /// Find matches for `source_id` on behalf of `acting_user_id`.
    ///
    /// Returns matches closest-origin first. A missing source journey is an
    /// error, never an empty list.
    pub async fn find_matches(
        &self,
        source_id: JourneyId,
        acting_user_id: UserId,
    ) -> Result<Vec<Match>, MatchError> {
        let source = self
            .store
            .journey(source_id)
            .await?
            .ok_or(MatchError::SourceNotFound(source_id))?;

        let acting_user = self
            .store
            .user(acting_user_id)
            .await?
            .map(Arc::new)
            .ok_or(MatchError::UserNotFound(acting_user_id))?;

        let already_requested = self.store.requested_journeys(acting_user_id).await?;
        let filter = CandidateFilter::new(&source, acting_user, already_requested, self.config)?;

        let pool = self.store.candidate_journeys(filter.query()).await?;
        let owners = self.load_owners(pool.iter().map(|j| j.user_id)).await?;

        let mut candidates = Vec::with_capacity(pool.len());
        for journey in pool {
            let Some(owner) = owners.get(&journey.user_id) else {
                warn!(
                    journey = %journey.journey_id,
                    owner = %journey.user_id,
                    "candidate owner missing from user store"
                );
                continue;
            };

            match filter.check(&journey, owner) {
                Ok(()) => candidates.push(Candidate {
                    owner_first_name: owner.first_name.clone(),
                    journey,
                }),
                Err(rejection) => {
                    trace!(journey = %journey.journey_id, %rejection, "candidate rejected");
                }
            }
        }

        let filtered = candidates.len();
        let (origin, destination) = source
            .endpoints()
            .ok_or(MatchError::MissingCoordinates(source_id))?;
        let matches = rank_candidates(origin, destination, candidates, self.config.radius_km);

        debug!(
            source = %source_id,
            user = %acting_user_id,
            filtered,
            matched = matches.len(),
            "match search complete"
        );

        Ok(matches)
    }

    /// Fetch the owners of the candidate journeys concurrently.
    async fn load_owners(
        &self,
        ids: impl Iterator<Item = UserId>,
    ) -> Result<HashMap<UserId, User>, StoreError> {
        let ids: BTreeSet<UserId> = ids.collect();
        let lookups = ids.iter().map(|id| self.store.user(*id));

        let mut owners = HashMap::with_capacity(ids.len());
        for (id, result) in ids.iter().zip(join_all(lookups).await) {
            if let Some(user) = result? {
                owners.insert(*id, user);
            }
        }

        Ok(owners)
    }
}
