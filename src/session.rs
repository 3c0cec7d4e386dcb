//! One dashboard session: selection, result cache and view state together
//!
//! Every selection change runs in the same order: mutate the store, derive
//! the key, make it the active view key, then hand it to the orchestrator
//! and apply whatever entry comes back.

use tracing::{debug, info};

use crate::config::Config;
use crate::data_fetcher::api::ScorerService;
use crate::data_fetcher::cache::{CacheStats, FetchOrchestrator};
use crate::error::AppError;
use crate::selection::{ParameterStore, QueryKey, Selector};
use crate::view_state::{ViewObserver, ViewState, ViewStateMachine};

pub struct DashboardSession<S> {
    store: ParameterStore,
    orchestrator: FetchOrchestrator<S>,
    view: ViewStateMachine,
}

impl<S: ScorerService> DashboardSession<S> {
    pub fn new(store: ParameterStore, orchestrator: FetchOrchestrator<S>) -> Self {
        let view = ViewStateMachine::new(store.query_key());
        Self {
            store,
            orchestrator,
            view,
        }
    }

    /// Builds a session from configuration, starting on the configured or
    /// command-line selection.
    pub fn from_config(
        service: S,
        config: &Config,
        competition: Option<&str>,
        season: Option<i32>,
    ) -> Result<Self, AppError> {
        let catalog = config.catalog()?;
        let selection = catalog.initial_selection(
            competition.or(config.initial_competition.as_deref()),
            season.or(config.initial_season),
        )?;
        let store = ParameterStore::new(catalog, selection)?;
        Ok(Self::new(store, FetchOrchestrator::from_config(service, config)))
    }

    pub fn subscribe(&mut self, observer: impl ViewObserver + 'static) {
        self.view.subscribe(observer);
    }

    pub fn store(&self) -> &ParameterStore {
        &self.store
    }

    pub fn orchestrator(&self) -> &FetchOrchestrator<S> {
        &self.orchestrator
    }

    pub fn view(&self) -> &ViewState {
        self.view.current()
    }

    pub fn active_key(&self) -> &QueryKey {
        self.view.active_key()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.orchestrator.stats()
    }

    /// Whether the active key still has a request in flight
    pub fn has_pending(&self) -> bool {
        self.orchestrator.is_in_flight(self.view.active_key())
    }

    /// Resolves the initial selection
    pub fn start(&mut self) -> &ViewState {
        let key = self.store.query_key();
        info!("Starting dashboard on {key}");
        self.show(key)
    }

    pub fn select_competition(&mut self, value: &str) -> Result<&ViewState, AppError> {
        let key = self.store.set_competition(value)?;
        Ok(self.show(key))
    }

    pub fn select_season(&mut self, year: i32) -> Result<&ViewState, AppError> {
        let key = self.store.set_season(year)?;
        Ok(self.show(key))
    }

    pub fn next_competition(&mut self) -> Result<&ViewState, AppError> {
        let key = self.store.next_competition()?;
        Ok(self.show(key))
    }

    pub fn previous_competition(&mut self) -> Result<&ViewState, AppError> {
        let key = self.store.previous_competition()?;
        Ok(self.show(key))
    }

    /// Selects the season highlighted in the open season selector
    pub fn select_highlighted_season(&mut self) -> Result<&ViewState, AppError> {
        let Some(year) = self.store.highlighted_season() else {
            return Ok(self.view.current());
        };
        self.select_season(year)
    }

    pub fn toggle_selector(&mut self, selector: Selector) {
        self.store.toggle(selector);
    }

    pub fn close_selectors(&mut self) {
        self.store.close_selectors();
    }

    pub fn move_season_cursor(&mut self, delta: isize) {
        self.store.move_season_cursor(delta);
    }

    /// Asks again for the active key. Fresh successes are served from cache,
    /// failures are fetched again.
    pub fn retry(&mut self) -> &ViewState {
        let key = self.view.active_key().clone();
        debug!("Retry requested for {key}");
        self.show(key)
    }

    /// Drops the cached entry for the active key and fetches it again.
    /// A request already in flight for the key is joined instead.
    pub fn refresh(&mut self) -> &ViewState {
        let key = self.view.active_key().clone();
        self.orchestrator.invalidate(&key);
        self.show(key)
    }

    /// Re-derives the view from the cache entry of the active key.
    /// Returns whether the view changed.
    pub fn sync(&mut self) -> bool {
        match self.orchestrator.resolve(self.view.active_key()) {
            Some(entry) => self.view.apply(&entry),
            None => false,
        }
    }

    /// Waits for the active key's request, if any, then syncs the view
    pub async fn settle(&mut self) -> &ViewState {
        let key = self.view.active_key().clone();
        if let Some(entry) = self.orchestrator.wait(&key).await {
            self.view.apply(&entry);
        }
        self.view.current()
    }

    fn show(&mut self, key: QueryKey) -> &ViewState {
        // The view must follow the new key before any fetch can complete
        self.view.activate(key.clone());
        let entry = self.orchestrator.on_key_changed(&key);
        self.view.apply(&entry);
        self.view.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::cache::Freshness;
    use crate::selection::Catalog;
    use crate::testing_utils::{ScriptedScorerService, TestDataBuilder};

    fn session(service: ScriptedScorerService) -> DashboardSession<ScriptedScorerService> {
        DashboardSession::new(
            ParameterStore::with_defaults(Catalog::builtin()),
            FetchOrchestrator::new(service, 10, Freshness::Session),
        )
    }

    #[tokio::test]
    async fn test_start_loads_then_settles_ready() {
        let service = ScriptedScorerService::new();
        service.respond_with("Premier League", 2024, TestDataBuilder::premier_league_2024());
        let mut session = session(service);

        assert!(session.start().is_loading());
        assert!(session.has_pending());
        assert!(session.settle().await.is_ready());
        assert!(!session.has_pending());
    }

    #[tokio::test]
    async fn test_invalid_selection_keeps_view() {
        let service = ScriptedScorerService::new();
        service.respond_with("Premier League", 2024, TestDataBuilder::premier_league_2024());
        let mut session = session(service);
        session.start();
        session.settle().await;

        assert!(session.select_competition("Eredivisie").is_err());
        assert!(session.select_season(1990).is_err());
        assert!(session.view().is_ready());
        assert_eq!(session.orchestrator().service().calls(), 1);
    }

    #[tokio::test]
    async fn test_switching_back_is_served_from_cache() {
        let service = ScriptedScorerService::new();
        service.respond_with("Premier League", 2024, TestDataBuilder::premier_league_2024());
        service.respond_with("La Liga", 2024, TestDataBuilder::la_liga_2023());
        let mut session = session(service);
        session.start();
        session.settle().await;

        session.select_competition("La Liga").unwrap();
        session.settle().await;
        assert!(session.select_competition("Premier League").unwrap().is_ready());
        assert_eq!(session.orchestrator().service().calls(), 2);
    }

    #[tokio::test]
    async fn test_refresh_refetches_active_key() {
        let service = ScriptedScorerService::new();
        service.respond_with("Premier League", 2024, TestDataBuilder::premier_league_2024());
        let mut session = session(service);
        session.start();
        session.settle().await;

        assert!(session.refresh().is_loading());
        assert!(session.settle().await.is_ready());
        assert_eq!(session.orchestrator().service().calls(), 2);
    }

    #[tokio::test]
    async fn test_refresh_while_pending_joins_request() {
        let service = ScriptedScorerService::new();
        service.respond_with("Premier League", 2024, TestDataBuilder::premier_league_2024());
        let gate = service.hold("Premier League", 2024);
        let mut session = session(service);
        session.start();

        assert!(session.refresh().is_loading());
        tokio::task::yield_now().await;
        assert_eq!(session.cache_stats().dispatched, 1);
        assert_eq!(session.cache_stats().in_flight, 1);

        gate.notify_one();
        assert!(session.settle().await.is_ready());
        assert_eq!(session.orchestrator().service().calls(), 1);
    }

    #[tokio::test]
    async fn test_highlighted_season_selection() {
        let service = ScriptedScorerService::new();
        service.respond_with("Premier League", 2023, TestDataBuilder::premier_league_2024());
        let mut session = session(service);

        session.toggle_selector(Selector::Season);
        session.move_season_cursor(1);
        session.select_highlighted_season().unwrap();
        assert_eq!(session.active_key().season_end_year(), 2023);
        assert!(!session.store().selectors().any_open());
        assert!(session.settle().await.is_ready());
    }

    #[tokio::test]
    async fn test_sync_picks_up_background_completion() {
        let service = ScriptedScorerService::new();
        service.respond_with("Premier League", 2024, TestDataBuilder::premier_league_2024());
        let mut session = session(service);
        session.start();

        let key = session.active_key().clone();
        session.orchestrator().wait(&key).await;
        assert!(session.view().is_loading());
        assert!(session.sync());
        assert!(session.view().is_ready());
        assert!(!session.sync());
    }
}
