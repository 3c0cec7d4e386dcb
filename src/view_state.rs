//! What the dashboard shows for the active query key
//!
//! [`ViewStateMachine`] maps cache entries to [`ViewState`]s and publishes
//! each change synchronously to its observers. It remembers the active key
//! and ignores entries for any other key, so a late result for a previous
//! selection never reaches the screen.

use std::sync::Arc;
use tracing::debug;

use crate::data_fetcher::cache::{CacheEntry, EntryStatus};
use crate::data_fetcher::models::ResultSet;
use crate::error::ErrorInfo;
use crate::projection::{DerivedStats, project};
use crate::selection::QueryKey;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading {
        key: QueryKey,
    },
    Error {
        key: QueryKey,
        error: ErrorInfo,
    },
    /// Successful fetch with no players. Not an error.
    Empty {
        key: QueryKey,
    },
    Ready {
        key: QueryKey,
        results: Arc<ResultSet>,
        stats: DerivedStats,
    },
}

impl ViewState {
    /// Maps a cache entry to the state it should be shown as
    pub fn from_entry(entry: &CacheEntry) -> Self {
        let key = entry.key.clone();
        match &entry.status {
            EntryStatus::Pending => ViewState::Loading { key },
            EntryStatus::Failure(error) => ViewState::Error {
                key,
                error: error.clone(),
            },
            EntryStatus::Success(results) if results.is_empty() => ViewState::Empty { key },
            EntryStatus::Success(results) => ViewState::Ready {
                key,
                stats: project(results),
                results: Arc::clone(results),
            },
        }
    }

    pub fn key(&self) -> &QueryKey {
        match self {
            ViewState::Loading { key }
            | ViewState::Error { key, .. }
            | ViewState::Empty { key }
            | ViewState::Ready { key, .. } => key,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ViewState::Error { .. })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ViewState::Empty { .. })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready { .. })
    }

    /// Short state name for logs
    pub fn label(&self) -> &'static str {
        match self {
            ViewState::Loading { .. } => "loading",
            ViewState::Error { .. } => "error",
            ViewState::Empty { .. } => "empty",
            ViewState::Ready { .. } => "ready",
        }
    }
}

/// Receives every published [`ViewState`].
pub trait ViewObserver: Send {
    fn on_view_state(&mut self, state: &ViewState);
}

impl<F> ViewObserver for F
where
    F: FnMut(&ViewState) + Send,
{
    fn on_view_state(&mut self, state: &ViewState) {
        self(state)
    }
}

pub struct ViewStateMachine {
    active: QueryKey,
    current: ViewState,
    observers: Vec<Box<dyn ViewObserver>>,
}

impl std::fmt::Debug for ViewStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewStateMachine")
            .field("active", &self.active)
            .field("current", &self.current)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl ViewStateMachine {
    /// Starts in `Loading` for the initial key
    pub fn new(initial: QueryKey) -> Self {
        Self {
            current: ViewState::Loading {
                key: initial.clone(),
            },
            active: initial,
            observers: Vec::new(),
        }
    }

    /// Registers an observer. It is not called with the current state.
    pub fn subscribe(&mut self, observer: impl ViewObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn current(&self) -> &ViewState {
        &self.current
    }

    pub fn active_key(&self) -> &QueryKey {
        &self.active
    }

    /// Switches the active key. Must happen before the fetch for `key` is
    /// dispatched; from here on entries for the previous key are ignored.
    pub fn activate(&mut self, key: QueryKey) {
        if key != self.active {
            debug!("Active view key: {} -> {}", self.active, key);
            self.active = key;
        }
    }

    /// Applies an entry. Returns whether a new state was published.
    pub fn apply(&mut self, entry: &CacheEntry) -> bool {
        if entry.key != self.active {
            debug!(
                "Ignoring entry for inactive key {} (active: {})",
                entry.key, self.active
            );
            return false;
        }

        let next = ViewState::from_entry(entry);
        if next == self.current {
            return false;
        }

        debug!(
            "View state {} -> {} for {}",
            self.current.label(),
            next.label(),
            next.key()
        );
        self.current = next;
        for observer in &mut self.observers {
            observer.on_view_state(&self.current);
        }
        true
    }
}
