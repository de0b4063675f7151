//! In-memory store.
//!
//! Holds the users, journeys and requests tables behind a single lock, so
//! every gateway call observes and mutates a consistent snapshot.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{Journey, JourneyId, NewRequest, Request, RequestId, RequestStatus, User, UserId};

use super::error::StoreError;
use super::seed::Seed;
use super::{CandidateQuery, InsertOutcome, Store, TransitionOutcome};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    journeys: BTreeMap<JourneyId, Journey>,
    requests: BTreeMap<RequestId, Request>,
    next_request_id: u64,
}

impl Tables {
    fn existing_request(&self, requester: UserId, journey: JourneyId) -> Option<RequestId> {
        self.requests
            .values()
            .find(|r| r.requester_id == requester && r.journey_id == journey)
            .map(|r| r.request_id)
    }

    fn allocate_request_id(&mut self) -> RequestId {
        self.next_request_id += 1;
        RequestId(self.next_request_id)
    }
}

/// A [`Store`] kept entirely in memory.
///
/// Cloning is cheap and clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated from seed data.
    ///
    /// Fails if the seed breaks a table constraint (duplicate ids, dangling
    /// references, self-requests or duplicate requests).
    pub fn from_seed(seed: Seed) -> Result<Self, StoreError> {
        seed.validate()?;

        let mut tables = Tables::default();
        for user in seed.users {
            tables.users.insert(user.user_id, user);
        }
        for journey in seed.journeys {
            tables.journeys.insert(journey.journey_id, journey);
        }
        for request in seed.requests {
            tables.next_request_id = tables.next_request_id.max(request.request_id.0);
            tables.requests.insert(request.request_id, request);
        }

        Ok(Self {
            tables: Arc::new(RwLock::new(tables)),
        })
    }

    /// Add or replace a user row.
    pub async fn put_user(&self, user: User) {
        let mut tables = self.tables.write().await;
        tables.users.insert(user.user_id, user);
    }

    /// Add or replace a journey row.
    pub async fn put_journey(&self, journey: Journey) {
        let mut tables = self.tables.write().await;
        tables.journeys.insert(journey.journey_id, journey);
    }

    /// Number of stored requests.
    pub async fn request_count(&self) -> usize {
        self.tables.read().await.requests.len()
    }
}

impl Store for MemoryStore {
    async fn user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn journey(&self, id: JourneyId) -> Result<Option<Journey>, StoreError> {
        Ok(self.tables.read().await.journeys.get(&id).cloned())
    }

    async fn candidate_journeys(&self, query: CandidateQuery) -> Result<Vec<Journey>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .journeys
            .values()
            .filter(|j| query.admits(j))
            .cloned()
            .collect())
    }

    async fn requested_journeys(&self, requester: UserId) -> Result<HashSet<JourneyId>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .requests
            .values()
            .filter(|r| r.requester_id == requester)
            .map(|r| r.journey_id)
            .collect())
    }

    async fn request(&self, id: RequestId) -> Result<Option<Request>, StoreError> {
        Ok(self.tables.read().await.requests.get(&id).cloned())
    }

    async fn insert_request(&self, request: NewRequest) -> Result<InsertOutcome, StoreError> {
        let mut tables = self.tables.write().await;

        if let Some(existing) = tables.existing_request(request.requester_id, request.journey_id) {
            return Ok(InsertOutcome::Duplicate(existing));
        }

        let id = tables.allocate_request_id();
        tables.requests.insert(id, request.into_request(id));
        Ok(InsertOutcome::Inserted(id))
    }

    async fn transition_status(
        &self,
        id: RequestId,
        from: RequestStatus,
        to: RequestStatus,
    ) -> Result<TransitionOutcome, StoreError> {
        let mut tables = self.tables.write().await;

        let Some(request) = tables.requests.get_mut(&id) else {
            return Ok(TransitionOutcome::Missing);
        };

        if request.status != from {
            return Ok(TransitionOutcome::Rejected {
                current: request.status,
            });
        }

        request.status = to;
        Ok(TransitionOutcome::Applied)
    }

    async fn delete_request(&self, id: RequestId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.requests.remove(&id).is_some())
    }

    async fn requests_for_recipient(&self, recipient: UserId) -> Result<Vec<Request>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .requests
            .values()
            .rev()
            .filter(|r| r.recipient_id == recipient)
            .cloned()
            .collect())
    }

    async fn requests_by_requester(&self, requester: UserId) -> Result<Vec<Request>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .requests
            .values()
            .rev()
            .filter(|r| r.requester_id == requester)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Message;

    fn new_request(requester: u64, recipient: u64, journey: u64) -> NewRequest {
        NewRequest {
            requester_id: UserId(requester),
            recipient_id: UserId(recipient),
            journey_id: JourneyId(journey),
            message: Message::parse("Room for one more?").unwrap(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = MemoryStore::new();

        let first = store.insert_request(new_request(1, 2, 10)).await.unwrap();
        let second = store.insert_request(new_request(3, 2, 10)).await.unwrap();

        assert_eq!(first, InsertOutcome::Inserted(RequestId(1)));
        assert_eq!(second, InsertOutcome::Inserted(RequestId(2)));

        let stored = store.request(RequestId(1)).await.unwrap().unwrap();
        assert_eq!(stored.status, RequestStatus::Pending);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_pair() {
        let store = MemoryStore::new();

        store.insert_request(new_request(1, 2, 10)).await.unwrap();
        let again = store.insert_request(new_request(1, 2, 10)).await.unwrap();

        assert_eq!(again, InsertOutcome::Duplicate(RequestId(1)));
        assert_eq!(store.request_count().await, 1);
    }

    #[tokio::test]
    async fn transition_is_compare_and_set() {
        let store = MemoryStore::new();
        store.insert_request(new_request(1, 2, 10)).await.unwrap();

        let applied = store
            .transition_status(RequestId(1), RequestStatus::Pending, RequestStatus::Approved)
            .await
            .unwrap();
        assert_eq!(applied, TransitionOutcome::Applied);

        let rejected = store
            .transition_status(RequestId(1), RequestStatus::Pending, RequestStatus::Denied)
            .await
            .unwrap();
        assert_eq!(
            rejected,
            TransitionOutcome::Rejected {
                current: RequestStatus::Approved
            }
        );

        let missing = store
            .transition_status(RequestId(99), RequestStatus::Pending, RequestStatus::Denied)
            .await
            .unwrap();
        assert_eq!(missing, TransitionOutcome::Missing);
    }

    #[tokio::test]
    async fn concurrent_transitions_apply_once() {
        let store = MemoryStore::new();
        store.insert_request(new_request(1, 2, 10)).await.unwrap();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                let to = if i % 2 == 0 {
                    RequestStatus::Approved
                } else {
                    RequestStatus::Denied
                };
                tokio::spawn(async move {
                    store
                        .transition_status(RequestId(1), RequestStatus::Pending, to)
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut applied = 0;
        for handle in handles {
            if handle.await.unwrap() == TransitionOutcome::Applied {
                applied += 1;
            }
        }
        assert_eq!(applied, 1);
    }

    #[tokio::test]
    async fn delete_frees_the_pair() {
        let store = MemoryStore::new();
        store.insert_request(new_request(1, 2, 10)).await.unwrap();

        assert!(store.delete_request(RequestId(1)).await.unwrap());
        assert!(!store.delete_request(RequestId(1)).await.unwrap());
        assert!(store.requested_journeys(UserId(1)).await.unwrap().is_empty());

        let again = store.insert_request(new_request(1, 2, 10)).await.unwrap();
        assert_eq!(again, InsertOutcome::Inserted(RequestId(2)));
    }

    #[tokio::test]
    async fn listings_are_newest_first() {
        let store = MemoryStore::new();
        store.insert_request(new_request(1, 2, 10)).await.unwrap();
        store.insert_request(new_request(3, 2, 11)).await.unwrap();
        store.insert_request(new_request(2, 1, 12)).await.unwrap();

        let inbox = store.requests_for_recipient(UserId(2)).await.unwrap();
        let ids: Vec<_> = inbox.iter().map(|r| r.request_id).collect();
        assert_eq!(ids, vec![RequestId(2), RequestId(1)]);

        let outbox = store.requests_by_requester(UserId(2)).await.unwrap();
        assert_eq!(outbox.len(), 1);
        assert_eq!(outbox[0].journey_id, JourneyId(12));
    }
}
