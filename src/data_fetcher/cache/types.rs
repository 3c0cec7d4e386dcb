//! Cache entry types with freshness support

use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::data_fetcher::models::ResultSet;
use crate::error::ErrorInfo;
use crate::selection::QueryKey;

/// Lifecycle of one cached query
#[derive(Debug, Clone, PartialEq)]
pub enum EntryStatus {
    /// Request dispatched, no result yet
    Pending,
    Success(Arc<ResultSet>),
    Failure(ErrorInfo),
}

/// Cached state of one query key.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub key: QueryKey,
    pub status: EntryStatus,
    /// Dispatch time for pending entries, completion time otherwise
    pub fetched_at: Instant,
    /// Wall clock counterpart of `fetched_at`, for display
    pub fetched_at_local: DateTime<Local>,
}

impl CacheEntry {
    fn with_status(key: QueryKey, status: EntryStatus) -> Self {
        Self {
            key,
            status,
            fetched_at: Instant::now(),
            fetched_at_local: Local::now(),
        }
    }

    /// Creates a pending entry for a request that was just dispatched
    pub fn pending(key: QueryKey) -> Self {
        Self::with_status(key, EntryStatus::Pending)
    }

    /// Creates a settled entry holding a successful payload
    pub fn success(key: QueryKey, results: Arc<ResultSet>) -> Self {
        Self::with_status(key, EntryStatus::Success(results))
    }

    /// Creates a settled entry holding a failure
    pub fn failure(key: QueryKey, error: ErrorInfo) -> Self {
        Self::with_status(key, EntryStatus::Failure(error))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, EntryStatus::Pending)
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, EntryStatus::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.status, EntryStatus::Failure(_))
    }

    pub fn data(&self) -> Option<&Arc<ResultSet>> {
        match &self.status {
            EntryStatus::Success(results) => Some(results),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        match &self.status {
            EntryStatus::Failure(error) => Some(error),
            _ => None,
        }
    }

    /// Time since dispatch (pending) or completion (settled)
    pub fn age(&self) -> Duration {
        self.fetched_at.elapsed()
    }
}

/// How long a successful entry may be served without asking the service again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Freshness {
    /// Entries stay valid until the session ends or they are invalidated
    #[default]
    Session,
    /// Entries older than the duration are refetched on the next key change
    Ttl(Duration),
}

impl Freshness {
    /// `None` keeps entries for the whole session
    pub fn from_ttl_seconds(ttl_seconds: Option<u64>) -> Self {
        match ttl_seconds {
            Some(seconds) => Freshness::Ttl(Duration::from_secs(seconds)),
            None => Freshness::Session,
        }
    }

    /// Checks whether a settled entry can still be served
    pub fn is_fresh(&self, entry: &CacheEntry) -> bool {
        match self {
            Freshness::Session => true,
            Freshness::Ttl(ttl) => {
                let age = entry.age();
                let is_fresh = age <= *ttl;
                debug!(
                    "Cache freshness check: key={}, age={:?}, ttl={:?}, is_fresh={}",
                    entry.key, age, ttl, is_fresh
                );
                is_fresh
            }
        }
    }
}

/// Size and activity counters of a result cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    pub capacity: usize,
    pub in_flight: usize,
    /// Key changes served from the cache
    pub hits: u64,
    /// Key changes that joined a request already in flight
    pub joined: u64,
    /// Requests dispatched to the scorer service
    pub dispatched: u64,
}
