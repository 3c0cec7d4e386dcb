//! Read-through result cache with per-key request de-duplication
//!
//! The orchestrator owns the key -> [`CacheEntry`] map for one dashboard
//! session. A key change either serves a fresh success from the map, joins
//! the request already in flight for that key, or dispatches exactly one new
//! request. Requests are never cancelled: a result that arrives after the
//! user moved on still lands in the map for later reuse.

use futures::future::{BoxFuture, FutureExt, Shared};
use lru::LruCache;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};

use crate::config::Config;
use crate::constants::cache::MAX_ENTRIES;
use crate::data_fetcher::api::{ScorerRequest, ScorerService};
use crate::error::ErrorInfo;
use crate::selection::QueryKey;

use super::types::{CacheEntry, CacheStats, Freshness};

type SharedFetch = Shared<BoxFuture<'static, CacheEntry>>;

struct CacheState {
    entries: LruCache<QueryKey, CacheEntry>,
    /// At most one outstanding request per key
    in_flight: HashMap<QueryKey, SharedFetch>,
    hits: u64,
    joined: u64,
    dispatched: u64,
}

pub struct FetchOrchestrator<S> {
    service: Arc<S>,
    limit: u32,
    freshness: Freshness,
    state: Arc<Mutex<CacheState>>,
}

fn lock(state: &Mutex<CacheState>) -> MutexGuard<'_, CacheState> {
    // The map stays consistent even if a holder panicked: every update is a single put/remove
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Stores a finished request and retires it from the in-flight map
fn settle(state: &Mutex<CacheState>, entry: CacheEntry) {
    let mut state = lock(state);
    state.in_flight.remove(&entry.key);
    state.entries.put(entry.key.clone(), entry);
}

impl<S: ScorerService> FetchOrchestrator<S> {
    /// Creates an orchestrator with the default cache capacity
    pub fn new(service: S, limit: u32, freshness: Freshness) -> Self {
        let capacity = NonZeroUsize::new(MAX_ENTRIES).unwrap_or(NonZeroUsize::MIN);
        Self::with_capacity(Arc::new(service), limit, freshness, capacity)
    }

    /// Creates an orchestrator holding at most `capacity` settled entries
    pub fn with_capacity(
        service: Arc<S>,
        limit: u32,
        freshness: Freshness,
        capacity: NonZeroUsize,
    ) -> Self {
        Self {
            service,
            limit,
            freshness,
            state: Arc::new(Mutex::new(CacheState {
                entries: LruCache::new(capacity),
                in_flight: HashMap::new(),
                hits: 0,
                joined: 0,
                dispatched: 0,
            })),
        }
    }

    /// Creates an orchestrator using the configured limit and freshness
    pub fn from_config(service: S, config: &Config) -> Self {
        Self::new(service, config.scorer_limit, config.freshness())
    }

    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    pub fn freshness(&self) -> Freshness {
        self.freshness
    }

    /// Current entry for `key`, without any I/O.
    pub fn resolve(&self, key: &QueryKey) -> Option<CacheEntry> {
        lock(&self.state).entries.get(key).cloned()
    }

    /// Entry point for a selection change.
    ///
    /// Returns the entry the view should show right now: a fresh success, the
    /// pending entry of a request already in flight, or the pending entry of
    /// a request dispatched by this call. Failed and expired entries are
    /// always refetched.
    #[instrument(skip(self))]
    pub fn on_key_changed(&self, key: &QueryKey) -> CacheEntry {
        let mut state = lock(&self.state);

        if state.in_flight.contains_key(key) {
            state.joined += 1;
            debug!("Request already in flight for {key}, joining it");
            if let Some(entry) = state.entries.get(key) {
                return entry.clone();
            }
            // Pending marker was pushed out of the LRU; the request itself is still tracked
            let entry = CacheEntry::pending(key.clone());
            state.entries.put(key.clone(), entry.clone());
            return entry;
        }

        if let Some(entry) = state.entries.get(key) {
            if entry.is_success() && self.freshness.is_fresh(entry) {
                let entry = entry.clone();
                state.hits += 1;
                debug!("Cache hit for {key}");
                return entry;
            }
            debug!("Cached entry for {key} is failed or expired, fetching again");
        } else {
            debug!("Cache miss for {key}");
        }

        self.dispatch(&mut state, key)
    }

    fn dispatch(&self, state: &mut CacheState, key: &QueryKey) -> CacheEntry {
        state.dispatched += 1;

        let request = ScorerRequest::from_key(key, self.limit);
        let service = Arc::clone(&self.service);
        let cache = Arc::clone(&self.state);
        let task_key = key.clone();

        let fetch: SharedFetch = async move {
            info!(
                "Fetching top scorers: competition={}, season={}, limit={}",
                request.competition, request.season_end_year, request.limit
            );
            let entry = match service.fetch_top_scorers(&request).await {
                Ok(results) => {
                    info!(
                        "Fetched {} scorers for {}",
                        results.players.len(),
                        task_key
                    );
                    CacheEntry::success(task_key, Arc::new(results))
                }
                Err(error) => {
                    warn!("Fetch failed for {}: {}", task_key, error);
                    CacheEntry::failure(task_key, ErrorInfo::from(&error))
                }
            };
            settle(&cache, entry.clone());
            entry
        }
        .boxed()
        .shared();

        let pending = CacheEntry::pending(key.clone());
        state.entries.put(key.clone(), pending.clone());
        state.in_flight.insert(key.clone(), fetch.clone());

        // Drive the request to completion even if nobody waits for it
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(fetch);
            }
            Err(_) => warn!("No async runtime available, request for {key} runs only when awaited"),
        }

        pending
    }

    /// Waits for the request in flight for `key`, if any, and returns the
    /// settled entry. Every waiter of the same request gets the same entry.
    pub async fn wait(&self, key: &QueryKey) -> Option<CacheEntry> {
        let fetch = lock(&self.state).in_flight.get(key).cloned();
        match fetch {
            Some(fetch) => Some(fetch.await),
            None => self.resolve(key),
        }
    }

    pub fn is_in_flight(&self, key: &QueryKey) -> bool {
        lock(&self.state).in_flight.contains_key(key)
    }

    /// Evicts the settled entry for `key`. Returns whether anything was removed.
    ///
    /// A key with a request in flight is left alone: that request is already
    /// the fresh fetch, and a second one would break de-duplication.
    #[instrument(skip(self))]
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        let mut state = lock(&self.state);
        if state.in_flight.contains_key(key) {
            debug!("Request in flight for {key}, keeping it");
            return false;
        }
        let removed = state.entries.pop(key).is_some();
        if removed {
            info!("Invalidated cache entry for {key}");
        }
        removed
    }

    /// Drops every settled entry. Requests in flight keep their pending entries.
    pub fn clear(&self) {
        let mut state = lock(&self.state);
        let settled: Vec<QueryKey> = state
            .entries
            .iter()
            .filter(|(key, _)| !state.in_flight.contains_key(*key))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &settled {
            state.entries.pop(key);
        }
        info!("Result cache cleared ({} entries)", settled.len());
    }

    pub fn stats(&self) -> CacheStats {
        let state = lock(&self.state);
        CacheStats {
            size: state.entries.len(),
            capacity: state.entries.cap().get(),
            in_flight: state.in_flight.len(),
            hits: state.hits,
            joined: state.joined,
            dispatched: state.dispatched,
        }
    }
}
