//! Caller-facing operations.
//!
//! The engine owns the store, the match configuration and a cached user
//! directory for the names shown in request views. Each operation takes the
//! acting user as an explicit argument.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{Decision, JourneyId, RequestId, UserId};
use crate::matching::{Match, MatchConfig, MatchError, Matcher};
use crate::requests::{RequestError, RequestManager, RequestView};
use crate::store::{CacheConfig, Store, UserDirectory};

/// Journey matching and ride requests over a [`Store`].
pub struct Engine<S> {
    store: Arc<S>,
    users: UserDirectory<S>,
    config: MatchConfig,
}

impl<S: Store> Engine<S> {
    pub fn new(store: Arc<S>, config: MatchConfig, cache: &CacheConfig) -> Self {
        let users = UserDirectory::new(store.clone(), cache);
        Self {
            store,
            users,
            config,
        }
    }

    /// Journeys that could be shared with `source`, closest origin first.
    pub async fn find_matches(
        &self,
        source: JourneyId,
        acting_user: UserId,
    ) -> Result<Vec<Match>, MatchError> {
        Matcher::new(&*self.store, &self.config)
            .find_matches(source, acting_user)
            .await
    }

    /// Ask to join `target`. Returns the id of the new `Pending` request.
    pub async fn send_request(
        &self,
        acting_user: UserId,
        target: JourneyId,
        message: &str,
    ) -> Result<RequestId, RequestError> {
        let journey = self
            .store
            .journey(target)
            .await?
            .ok_or(RequestError::JourneyNotFound(target))?;

        debug!(user = %acting_user, journey = %target, "sending request");
        self.requests().create_request(acting_user, &journey, message).await
    }

    pub async fn respond_to_request(
        &self,
        request: RequestId,
        acting_user: UserId,
        decision: Decision,
    ) -> Result<(), RequestError> {
        self.requests().respond(request, acting_user, decision).await
    }

    pub async fn cancel_request(
        &self,
        request: RequestId,
        acting_user: UserId,
    ) -> Result<(), RequestError> {
        self.requests().cancel(request, acting_user).await
    }

    /// Requests addressed to `user`, newest first.
    pub async fn incoming_requests(&self, user: UserId) -> Result<Vec<RequestView>, RequestError> {
        self.requests().incoming(user).await
    }

    /// Requests sent by `user`, newest first.
    pub async fn outgoing_requests(&self, user: UserId) -> Result<Vec<RequestView>, RequestError> {
        self.requests().outgoing(user).await
    }

    pub async fn request_details(
        &self,
        request: RequestId,
        acting_user: UserId,
    ) -> Result<RequestView, RequestError> {
        self.requests().details(request, acting_user).await
    }

    fn requests(&self) -> RequestManager<'_, S> {
        RequestManager::new(&*self.store, &self.users)
    }
}
