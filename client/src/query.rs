//! Query cache
//!
//! Caches JSON results under structured keys such as
//! `["/api/reports/user", "<id>"]`. A cached value is served until it is older
//! than the stale time or invalidated. Concurrent fetches of the same key are
//! collapsed: later callers wait for the first fetch and read its result.
//! A fetch that was invalidated while it ran still returns its data to the
//! caller but leaves nothing in the cache.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::Instant;

use crate::error::ClientResult;

/// Default freshness window
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(30);

/// Hierarchical cache key; prefixes match whole segments
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new(root: impl Into<String>) -> Self {
        Self(vec![root.into()])
    }

    pub fn with(mut self, segment: impl ToString) -> Self {
        self.0.push(segment.to_string());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Debug for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.0).finish()
    }
}

struct Entry {
    value: Value,
    fetched_at: Instant,
}

/// Per-key fetch gate; `generation` moves on every invalidation of the key
#[derive(Default)]
struct Flight {
    turn: tokio::sync::Mutex<()>,
    generation: AtomicU64,
}

#[derive(Default)]
struct State {
    entries: HashMap<QueryKey, Entry>,
    in_flight: HashMap<QueryKey, Arc<Flight>>,
}

/// Drops the key's gate once no other caller holds it
struct InFlight<'a> {
    cache: &'a QueryCache,
    key: &'a QueryKey,
    flight: Arc<Flight>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut state = self.cache.lock();
        let idle = state
            .in_flight
            .get(self.key)
            .is_some_and(|f| Arc::ptr_eq(f, &self.flight) && Arc::strong_count(f) == 2);
        if idle {
            state.in_flight.remove(self.key);
        }
    }
}

/// Shared, cloneable query cache
#[derive(Clone)]
pub struct QueryCache {
    state: Arc<Mutex<State>>,
    stale_time: Duration,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_STALE_TIME)
    }
}

impl QueryCache {
    pub fn new(stale_time: Duration) -> Self {
        Self {
            state: Arc::default(),
            stale_time,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fresh(&self, key: &QueryKey) -> Option<Value> {
        let state = self.lock();
        let entry = state.entries.get(key)?;
        (entry.fetched_at.elapsed() < self.stale_time).then(|| entry.value.clone())
    }

    /// Return the cached value if fresh, otherwise run `fetcher` and cache it
    ///
    /// Errors from `fetcher` are returned as-is and nothing is cached.
    pub async fn fetch<T, F, Fut>(&self, key: &QueryKey, fetcher: F) -> ClientResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        if let Some(value) = self.fresh(key) {
            tracing::trace!(?key, "query cache hit");
            return Ok(serde_json::from_value(value)?);
        }

        let flight = self.lock().in_flight.entry(key.clone()).or_default().clone();
        let guard = InFlight {
            cache: self,
            key,
            flight,
        };
        self.fetch_in_turn(key, &guard.flight, fetcher).await
    }

    async fn fetch_in_turn<T, F, Fut>(
        &self,
        key: &QueryKey,
        flight: &Flight,
        fetcher: F,
    ) -> ClientResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let _turn = flight.turn.lock().await;

        // Whoever held the gate before us may have filled the entry
        if let Some(value) = self.fresh(key) {
            return Ok(serde_json::from_value(value)?);
        }

        tracing::debug!(?key, "query cache miss");
        let generation = flight.generation.load(Ordering::Acquire);
        let data = fetcher().await?;
        let value = serde_json::to_value(&data)?;

        let mut state = self.lock();
        if flight.generation.load(Ordering::Acquire) == generation {
            state.entries.insert(
                key.clone(),
                Entry {
                    value,
                    fetched_at: Instant::now(),
                },
            );
        } else {
            tracing::debug!(?key, "query invalidated while fetching, result not cached");
        }
        Ok(data)
    }

    /// Cached value regardless of age
    pub fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> ClientResult<Option<T>> {
        let value = self.lock().entries.get(key).map(|e| e.value.clone());
        Ok(value.map(serde_json::from_value).transpose()?)
    }

    /// Store a value as if it had just been fetched
    pub fn set<T: Serialize>(&self, key: &QueryKey, data: &T) -> ClientResult<()> {
        let value = serde_json::to_value(data)?;
        self.lock().entries.insert(
            key.clone(),
            Entry {
                value,
                fetched_at: Instant::now(),
            },
        );
        Ok(())
    }

    /// Drop every entry whose key starts with `prefix`; returns how many
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut state = self.lock();
        for (key, flight) in &state.in_flight {
            if key.starts_with(prefix) {
                flight.generation.fetch_add(1, Ordering::AcqRel);
            }
        }
        let before = state.entries.len();
        state.entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - state.entries.len();
        if removed > 0 {
            tracing::debug!(?prefix, removed, "queries invalidated");
        }
        removed
    }

    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        for flight in state.in_flight.values() {
            flight.generation.fetch_add(1, Ordering::AcqRel);
        }
        state.in_flight.clear();
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
