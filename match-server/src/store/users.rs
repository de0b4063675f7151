//! Cached user lookups.
//!
//! Request views show the first names of both parties, and an inbox lists
//! the same few users over and over. Those lookups go through a short-lived
//! cache in front of the store; a renamed user shows the old name until the
//! entry expires. The matcher reads users from the store directly.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{User, UserId};

use super::error::StoreError;
use super::Store;

/// Configuration for the user cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 10_000,
        }
    }
}

/// User lookups with caching.
///
/// Wraps a [`Store`] and caches user rows. Missing users are not cached.
pub struct UserDirectory<S> {
    store: Arc<S>,
    cache: MokaCache<UserId, Arc<User>>,
}

impl<S: Store> UserDirectory<S> {
    /// Create a new cached directory.
    pub fn new(store: Arc<S>, config: &CacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { store, cache }
    }

    /// Look up a user, using the cache if available.
    pub async fn get(&self, id: UserId) -> Result<Option<Arc<User>>, StoreError> {
        if let Some(cached) = self.cache.get(&id).await {
            return Ok(Some(cached));
        }

        let Some(user) = self.store.user(id).await? else {
            return Ok(None);
        };

        let user = Arc::new(user);
        self.cache.insert(id, user.clone()).await;
        Ok(Some(user))
    }
}
