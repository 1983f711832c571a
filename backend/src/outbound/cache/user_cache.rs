//! Bounded TTL cache for API-key user lookups.
//!
//! Authentication resolves a key fingerprint to a user on every request, so
//! lookups are cached with a bounded LRU map. Entries expire after a TTL
//! with a small random extension so a burst of inserts does not expire in
//! one thundering herd. Concurrent misses for the same fingerprint share a
//! single store load through a cloneable future instead of stampeding the
//! database.
//!
//! Negative lookups are not cached; an unknown key should authenticate
//! immediately once the user is provisioned.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use rand::Rng;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::user::User;

/// Sizing and expiry knobs for [`UserCache`].
#[derive(Debug, Clone, Copy)]
pub struct UserCacheConfig {
    /// Maximum number of cached users; the least recently used entry is
    /// evicted beyond this. Zero disables caching entirely.
    pub capacity: usize,
    /// Base lifetime of a cached entry.
    pub ttl: Duration,
}

impl Default for UserCacheConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            ttl: Duration::from_secs(300),
        }
    }
}

/// Point-in-time cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups served from the cache.
    pub hits: u64,
    /// Lookups that went to the store.
    pub misses: u64,
    /// Entries dropped to make room.
    pub evictions: u64,
    /// Entries currently cached.
    pub entries: usize,
}

struct CachedUser {
    user: User,
    expires_at: Instant,
}

/// Map plus recency queue; the front of the queue is the eviction victim.
#[derive(Default)]
struct CacheState {
    entries: HashMap<String, CachedUser>,
    recency: VecDeque<String>,
}

impl CacheState {
    fn promote(&mut self, fingerprint: &str) {
        self.recency.retain(|key| key != fingerprint);
        self.recency.push_back(fingerprint.to_owned());
    }

    fn remove(&mut self, fingerprint: &str) {
        self.entries.remove(fingerprint);
        self.recency.retain(|key| key != fingerprint);
    }
}

type SharedLoad = Shared<BoxFuture<'static, Result<Option<User>, UserStoreError>>>;

/// Caching decorator over a [`UserStore`].
pub struct UserCache {
    store: Arc<dyn UserStore>,
    config: UserCacheConfig,
    state: Mutex<CacheState>,
    pending: Mutex<HashMap<String, SharedLoad>>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl UserCache {
    /// Wrap a store with a bounded cache.
    #[must_use]
    pub fn new(store: Arc<dyn UserStore>, config: UserCacheConfig) -> Self {
        Self {
            store,
            config,
            state: Mutex::new(CacheState::default()),
            pending: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Resolve a fingerprint, preferring the cache over the store.
    ///
    /// Expired entries are dropped on access. A miss triggers exactly one
    /// store load even under concurrent callers; every caller observes that
    /// load's outcome.
    ///
    /// # Errors
    /// Propagates the store failure when the backing lookup fails.
    pub async fn get_or_load(&self, fingerprint: &str) -> Result<Option<User>, UserStoreError> {
        if let Some(user) = self.lookup(fingerprint).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Some(user));
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let load = self.join_or_start_load(fingerprint).await;
        let outcome = load.await;

        self.pending.lock().await.remove(fingerprint);
        if let Ok(Some(user)) = &outcome {
            self.insert(fingerprint, user.clone()).await;
        }
        outcome
    }

    /// Current counters, for logging and diagnostics.
    pub async fn stats(&self) -> CacheStats {
        let state = self.state.lock().await;
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            entries: state.entries.len(),
        }
    }

    async fn lookup(&self, fingerprint: &str) -> Option<User> {
        let mut state = self.state.lock().await;
        match state.entries.get(fingerprint) {
            Some(cached) if cached.expires_at > Instant::now() => {
                let user = cached.user.clone();
                state.promote(fingerprint);
                Some(user)
            }
            Some(_) => {
                state.remove(fingerprint);
                None
            }
            None => None,
        }
    }

    async fn join_or_start_load(&self, fingerprint: &str) -> SharedLoad {
        let mut pending = self.pending.lock().await;
        if let Some(existing) = pending.get(fingerprint) {
            return existing.clone();
        }
        let store = Arc::clone(&self.store);
        let key = fingerprint.to_owned();
        let load: SharedLoad = async move { store.find_by_fingerprint(&key).await }
            .boxed()
            .shared();
        pending.insert(fingerprint.to_owned(), load.clone());
        load
    }

    async fn insert(&self, fingerprint: &str, user: User) {
        if self.config.capacity == 0 {
            return;
        }
        let expires_at = Instant::now() + self.config.ttl + self.jitter();
        let mut state = self.state.lock().await;
        if !state.entries.contains_key(fingerprint) && state.entries.len() >= self.config.capacity
        {
            if let Some(victim) = state.recency.pop_front() {
                state.entries.remove(&victim);
                self.evictions.fetch_add(1, Ordering::Relaxed);
                debug!(fingerprint = %victim, "evicted least recently used cache entry");
            }
        }
        state.entries.insert(
            fingerprint.to_owned(),
            CachedUser { user, expires_at },
        );
        state.promote(fingerprint);
    }

    /// Random extension up to 10% of the TTL, de-synchronising expiry of
    /// entries inserted together.
    fn jitter(&self) -> Duration {
        let window = u64::try_from((self.config.ttl / 10).as_millis()).unwrap_or(u64::MAX);
        if window == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..=window))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use async_trait::async_trait;
    use crate::domain::actor::Role;
    use crate::domain::ports::InMemoryUserStore;
    use chrono::Utc;
    use uuid::Uuid;

    /// Test double counting store hits, with optional artificial latency.
    struct CountingStore {
        user: User,
        latency: Duration,
        calls: AtomicU64,
    }

    impl CountingStore {
        fn new(user: User, latency: Duration) -> Self {
            Self {
                user,
                latency,
                calls: AtomicU64::new(0),
            }
        }

        fn calls(&self) -> u64 {
            self.calls.load(Ordering::Relaxed)
        }
    }

    #[async_trait]
    impl UserStore for CountingStore {
        async fn find_by_fingerprint(
            &self,
            fingerprint: &str,
        ) -> Result<Option<User>, UserStoreError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            Ok((fingerprint == self.user.key_fingerprint).then(|| self.user.clone()))
        }
    }

    fn user(fingerprint: &str) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: format!("{fingerprint}@terraviva.example"),
            display_name: "Cache test".to_owned(),
            role: Role::Viewer,
            grants: Vec::new(),
            key_fingerprint: fingerprint.to_owned(),
            created_at: now,
            updated_at: now,
        }
    }

    fn config(capacity: usize, ttl: Duration) -> UserCacheConfig {
        UserCacheConfig { capacity, ttl }
    }

    #[tokio::test]
    async fn second_lookup_is_a_hit() {
        let store = Arc::new(InMemoryUserStore::new());
        store.add(user("fp-1")).await;
        let cache = UserCache::new(store, config(8, Duration::from_secs(60)));

        let first = cache.get_or_load("fp-1").await.expect("load succeeds");
        assert!(first.is_some());
        let second = cache.get_or_load("fp-1").await.expect("load succeeds");
        assert!(second.is_some());

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test]
    async fn unknown_keys_are_not_cached() {
        let store = Arc::new(InMemoryUserStore::new());
        let cache = UserCache::new(store.clone(), config(8, Duration::from_secs(60)));

        assert!(cache.get_or_load("fp-x").await.expect("load").is_none());
        store.add(user("fp-x")).await;
        assert!(cache.get_or_load("fp-x").await.expect("load").is_some());
    }

    #[tokio::test]
    async fn concurrent_misses_share_one_store_load() {
        let store = Arc::new(CountingStore::new(
            user("fp-d"),
            Duration::from_millis(50),
        ));
        let cache = Arc::new(UserCache::new(
            store.clone(),
            config(8, Duration::from_secs(60)),
        ));

        let first = tokio::spawn({
            let cache = Arc::clone(&cache);
            async move { cache.get_or_load("fp-d").await }
        });
        // Give the first task time to register its in-flight load.
        tokio::time::sleep(Duration::from_millis(10)).await;
        let second = tokio::spawn({
            let cache = Arc::clone(&cache);
            async move { cache.get_or_load("fp-d").await }
        });

        let a = first.await.expect("task runs").expect("first load");
        let b = second.await.expect("task runs").expect("second load");
        assert!(a.is_some());
        assert!(b.is_some());
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn store_failures_propagate_and_are_not_cached() {
        let mut mock = crate::domain::ports::MockUserStore::new();
        mock.expect_find_by_fingerprint()
            .times(2)
            .returning(|_| Err(UserStoreError::query("relation users does not exist")));
        let cache = UserCache::new(Arc::new(mock), config(8, Duration::from_secs(60)));

        cache.get_or_load("fp-e").await.expect_err("first failure");
        cache.get_or_load("fp-e").await.expect_err("second failure");
        assert_eq!(cache.stats().await.entries, 0);
    }

    #[tokio::test]
    async fn expired_entries_are_reloaded() {
        let store = Arc::new(CountingStore::new(user("fp-t"), Duration::ZERO));
        let cache = UserCache::new(store.clone(), config(8, Duration::ZERO));

        cache.get_or_load("fp-t").await.expect("first load");
        tokio::time::sleep(Duration::from_millis(5)).await;
        cache.get_or_load("fp-t").await.expect("second load");
        assert_eq!(store.calls(), 2);
    }

    #[tokio::test]
    async fn capacity_overflow_evicts_the_least_recently_used() {
        let store = Arc::new(InMemoryUserStore::new());
        for fingerprint in ["fp-a", "fp-b", "fp-c"] {
            store.add(user(fingerprint)).await;
        }
        let cache = UserCache::new(store, config(2, Duration::from_secs(60)));

        cache.get_or_load("fp-a").await.expect("load a");
        cache.get_or_load("fp-b").await.expect("load b");
        // Touch a so b becomes the eviction victim.
        cache.get_or_load("fp-a").await.expect("hit a");
        cache.get_or_load("fp-c").await.expect("load c");

        let stats = cache.stats().await;
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.entries, 2);

        // a stayed cached; b was evicted and misses again.
        cache.get_or_load("fp-a").await.expect("hit a");
        cache.get_or_load("fp-b").await.expect("reload b");
        let stats = cache.stats().await;
        assert_eq!(stats.misses, 4);
    }
}
