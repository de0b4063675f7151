//! Request state machine.
//!
//! ```text
//!            approve (recipient)
//!   Pending ─────────────────────▶ Approved
//!      │     deny (recipient)
//!      └─────────────────────────▶ Denied
//!
//!   any status ── cancel (requester) ──▶ deleted
//! ```
//!
//! Approve and deny are compare-and-set updates in the store, so two
//! concurrent responses cannot both succeed.

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::{
    Decision, Journey, Message, NewRequest, Request, RequestId, RequestStatus, UserId,
};
use crate::store::{InsertOutcome, Store, TransitionOutcome, UserDirectory};

use super::error::{RequestError, Role};

/// A request together with the journey and the names of both parties.
///
/// The journey or a user may have been deleted since the request was made,
/// in which case the corresponding field is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestView {
    pub request: Request,
    pub journey: Option<Journey>,
    pub requester_first_name: Option<String>,
    pub recipient_first_name: Option<String>,
}

/// Creates, transitions and deletes requests.
pub struct RequestManager<'a, S> {
    store: &'a S,
    users: &'a UserDirectory<S>,
}

impl<'a, S: Store> RequestManager<'a, S> {
    /// Create a new manager.
    pub fn new(store: &'a S, users: &'a UserDirectory<S>) -> Self {
        Self { store, users }
    }

    /// Send a request to join `journey` on behalf of `requester_id`.
    ///
    /// The store rejects a second request from the same requester for the
    /// same journey, whatever the status of the first.
    pub async fn create_request(
        &self,
        requester_id: UserId,
        journey: &Journey,
        message: &str,
    ) -> Result<RequestId, RequestError> {
        let message = Message::parse(message)?;

        if journey.user_id == requester_id {
            return Err(RequestError::SelfRequest(requester_id));
        }

        let new = NewRequest {
            requester_id,
            recipient_id: journey.user_id,
            journey_id: journey.journey_id,
            message,
        };

        match self.store.insert_request(new).await? {
            InsertOutcome::Inserted(id) => {
                info!(
                    request = %id,
                    requester = %requester_id,
                    journey = %journey.journey_id,
                    "request created"
                );
                Ok(id)
            }
            InsertOutcome::Duplicate(existing) => Err(RequestError::Conflict {
                requester: requester_id,
                journey: journey.journey_id,
                existing,
            }),
        }
    }

    /// Approve a pending request. Only the recipient may approve.
    pub async fn approve(&self, id: RequestId, acting_user: UserId) -> Result<(), RequestError> {
        self.respond(id, acting_user, Decision::Approve).await
    }

    /// Deny a pending request. Only the recipient may deny.
    pub async fn deny(&self, id: RequestId, acting_user: UserId) -> Result<(), RequestError> {
        self.respond(id, acting_user, Decision::Deny).await
    }

    /// Apply the recipient's decision to a pending request.
    pub async fn respond(
        &self,
        id: RequestId,
        acting_user: UserId,
        decision: Decision,
    ) -> Result<(), RequestError> {
        let request = self.load(id).await?;

        if request.recipient_id != acting_user {
            return Err(RequestError::Forbidden {
                request: id,
                user: acting_user,
                required: Role::Recipient,
            });
        }

        // Checked again atomically by the store below; this just avoids a
        // write for the common case.
        if request.status.is_terminal() {
            return Err(RequestError::InvalidState {
                request: id,
                current: request.status,
            });
        }

        let to = decision.target_status();
        match self
            .store
            .transition_status(id, RequestStatus::Pending, to)
            .await?
        {
            TransitionOutcome::Applied => {
                info!(request = %id, status = %to, "request answered");
                Ok(())
            }
            TransitionOutcome::Rejected { current } => {
                debug!(request = %id, %current, "lost race to answer request");
                Err(RequestError::InvalidState {
                    request: id,
                    current,
                })
            }
            TransitionOutcome::Missing => Err(RequestError::NotFound(id)),
        }
    }

    /// Withdraw a request. Only the requester may cancel; any status may be
    /// cancelled, and the request is deleted.
    pub async fn cancel(&self, id: RequestId, acting_user: UserId) -> Result<(), RequestError> {
        let request = self.load(id).await?;

        if request.requester_id != acting_user {
            return Err(RequestError::Forbidden {
                request: id,
                user: acting_user,
                required: Role::Requester,
            });
        }

        if !self.store.delete_request(id).await? {
            return Err(RequestError::NotFound(id));
        }

        info!(request = %id, status = %request.status, "request cancelled");
        Ok(())
    }

    /// Requests addressed to `user`, newest first.
    pub async fn incoming(&self, user: UserId) -> Result<Vec<RequestView>, RequestError> {
        let requests = self.store.requests_for_recipient(user).await?;
        self.views(requests).await
    }

    /// Requests sent by `user`, newest first.
    pub async fn outgoing(&self, user: UserId) -> Result<Vec<RequestView>, RequestError> {
        let requests = self.store.requests_by_requester(user).await?;
        self.views(requests).await
    }

    /// One request, visible only to its two parties.
    pub async fn details(
        &self,
        id: RequestId,
        acting_user: UserId,
    ) -> Result<RequestView, RequestError> {
        let request = self.load(id).await?;

        if request.requester_id != acting_user && request.recipient_id != acting_user {
            return Err(RequestError::Forbidden {
                request: id,
                user: acting_user,
                required: Role::Participant,
            });
        }

        self.view(request).await
    }

    async fn load(&self, id: RequestId) -> Result<Request, RequestError> {
        self.store
            .request(id)
            .await?
            .ok_or(RequestError::NotFound(id))
    }

    async fn views(&self, requests: Vec<Request>) -> Result<Vec<RequestView>, RequestError> {
        let mut views = Vec::with_capacity(requests.len());
        for request in requests {
            views.push(self.view(request).await?);
        }
        Ok(views)
    }

    async fn view(&self, request: Request) -> Result<RequestView, RequestError> {
        let journey = self.store.journey(request.journey_id).await?;
        let requester = self.users.get(request.requester_id).await?;
        let recipient = self.users.get(request.recipient_id).await?;

        Ok(RequestView {
            request,
            journey,
            requester_first_name: requester.map(|u| u.first_name.clone()),
            recipient_first_name: recipient.map(|u| u.first_name.clone()),
        })
    }
}
