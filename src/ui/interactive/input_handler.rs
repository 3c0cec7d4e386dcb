//! Keyboard input handling for the interactive UI.
//!
//! Key events are first mapped to an [`Action`] (pure, depends only on the
//! key and which selector is open), then applied to the session.

use crate::data_fetcher::api::ScorerService;
use crate::selection::{Selector, SelectorState};
use crate::session::DashboardSession;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

/// What a key press asks the dashboard to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    PreviousCompetition,
    NextCompetition,
    /// Zero-based catalog index
    PickCompetition(usize),
    ToggleSelector(Selector),
    MoveSeasonCursor(isize),
    /// Selects the highlighted season
    Confirm,
    CloseSelectors,
    /// Retries a failed page, refreshes a loaded one, ignored while loading
    Reload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Continue,
    Quit,
}

/// Maps a key event to an action. Releases and repeats of non-navigation keys are ignored.
pub fn map_key(key_event: &KeyEvent, selectors: SelectorState) -> Option<Action> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }

    match key_event.code {
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::Quit)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        KeyCode::Left => Some(Action::PreviousCompetition),
        KeyCode::Right => Some(Action::NextCompetition),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c.to_digit(10).map(|d| d as usize - 1)?;
            Some(Action::PickCompetition(index))
        }
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::ToggleSelector(Selector::Season)),
        KeyCode::Char('l') | KeyCode::Char('L') => Some(Action::ToggleSelector(Selector::League)),
        KeyCode::Up if selectors.season_open => Some(Action::MoveSeasonCursor(-1)),
        KeyCode::Down if selectors.season_open => Some(Action::MoveSeasonCursor(1)),
        KeyCode::Enter if selectors.season_open => Some(Action::Confirm),
        KeyCode::Esc if selectors.any_open() => Some(Action::CloseSelectors),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Reload),
        _ => None,
    }
}

/// Applies an action to the session.
///
/// Rejected selections (e.g. a digit past the last competition) leave the
/// session unchanged.
pub fn apply_action<S: ScorerService>(
    session: &mut DashboardSession<S>,
    action: Action,
) -> ActionOutcome {
    debug!("Applying action: {action:?}");
    let result = match action {
        Action::Quit => return ActionOutcome::Quit,
        Action::PreviousCompetition => session.previous_competition().map(|_| ()),
        Action::NextCompetition => session.next_competition().map(|_| ()),
        Action::PickCompetition(index) => {
            let name = session
                .store()
                .catalog()
                .competitions()
                .get(index)
                .map(|c| c.name.clone());
            match name {
                Some(name) => session.select_competition(&name).map(|_| ()),
                None => {
                    debug!("No competition at position {}", index + 1);
                    Ok(())
                }
            }
        }
        Action::ToggleSelector(selector) => {
            session.toggle_selector(selector);
            Ok(())
        }
        Action::MoveSeasonCursor(delta) => {
            session.move_season_cursor(delta);
            Ok(())
        }
        Action::Confirm => session.select_highlighted_season().map(|_| ()),
        Action::CloseSelectors => {
            session.close_selectors();
            Ok(())
        }
        Action::Reload => {
            let view = session.view();
            if view.is_loading() {
                debug!("Reload ignored, request already in flight");
            } else if view.is_error() {
                session.retry();
            } else {
                session.refresh();
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        debug!("Action {action:?} rejected: {e}");
    }
    ActionOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::cache::{FetchOrchestrator, Freshness};
    use crate::selection::{Catalog, ParameterStore};
    use crate::testing_utils::{ScriptedScorerService, TestDataBuilder};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn closed() -> SelectorState {
        SelectorState::default()
    }

    fn season_open() -> SelectorState {
        SelectorState {
            season_open: true,
            ..SelectorState::default()
        }
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(map_key(&key(KeyCode::Char('q')), closed()), Some(Action::Quit));
        assert_eq!(
            map_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), closed()),
            Some(Action::Quit)
        );
        assert_eq!(map_key(&key(KeyCode::Left), closed()), Some(Action::PreviousCompetition));
        assert_eq!(map_key(&key(KeyCode::Right), closed()), Some(Action::NextCompetition));
        assert_eq!(map_key(&key(KeyCode::Char('1')), closed()), Some(Action::PickCompetition(0)));
        assert_eq!(map_key(&key(KeyCode::Char('9')), closed()), Some(Action::PickCompetition(8)));
        assert_eq!(map_key(&key(KeyCode::Char('0')), closed()), None);
        assert_eq!(map_key(&key(KeyCode::Char('r')), closed()), Some(Action::Reload));
    }

    #[test]
    fn test_season_keys_depend_on_open_selector() {
        assert_eq!(map_key(&key(KeyCode::Up), closed()), None);
        assert_eq!(map_key(&key(KeyCode::Enter), closed()), None);
        assert_eq!(map_key(&key(KeyCode::Esc), closed()), None);

        assert_eq!(map_key(&key(KeyCode::Up), season_open()), Some(Action::MoveSeasonCursor(-1)));
        assert_eq!(map_key(&key(KeyCode::Down), season_open()), Some(Action::MoveSeasonCursor(1)));
        assert_eq!(map_key(&key(KeyCode::Enter), season_open()), Some(Action::Confirm));
        assert_eq!(map_key(&key(KeyCode::Esc), season_open()), Some(Action::CloseSelectors));
        assert_eq!(
            map_key(&key(KeyCode::Char('s')), closed()),
            Some(Action::ToggleSelector(Selector::Season))
        );
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut release = key(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(&release, closed()), None);
    }

    fn session() -> DashboardSession<ScriptedScorerService> {
        let service = ScriptedScorerService::new();
        service.respond_with("Premier League", 2024, TestDataBuilder::premier_league_2024());
        service.respond_with("La Liga", 2024, TestDataBuilder::la_liga_2023());
        service.respond_with("Premier League", 2023, TestDataBuilder::premier_league_2024());
        DashboardSession::new(
            ParameterStore::with_defaults(Catalog::builtin()),
            FetchOrchestrator::new(service, 10, Freshness::Session),
        )
    }

    #[tokio::test]
    async fn test_pick_competition_by_digit() {
        let mut session = session();
        session.start();

        assert_eq!(apply_action(&mut session, Action::PickCompetition(1)), ActionOutcome::Continue);
        assert_eq!(session.active_key().competition(), "La Liga");

        // Past the end of the catalog: nothing happens
        apply_action(&mut session, Action::PickCompetition(8));
        assert_eq!(session.active_key().competition(), "La Liga");
    }

    #[tokio::test]
    async fn test_season_selection_flow() {
        let mut session = session();
        session.start();

        apply_action(&mut session, Action::ToggleSelector(Selector::Season));
        apply_action(&mut session, Action::MoveSeasonCursor(1));
        apply_action(&mut session, Action::Confirm);

        assert_eq!(session.active_key().season_end_year(), 2023);
        assert!(!session.store().selectors().any_open());
        assert!(session.settle().await.is_ready());
    }

    #[tokio::test]
    async fn test_reload_refetches() {
        let mut session = session();
        session.start();
        session.settle().await;

        apply_action(&mut session, Action::Reload);
        session.settle().await;
        assert_eq!(session.orchestrator().service().calls(), 2);
    }

    #[tokio::test]
    async fn test_reload_while_loading_sends_nothing() {
        let mut session = session();
        let gate = session.orchestrator().service().hold("Premier League", 2024);
        session.start();

        apply_action(&mut session, Action::Reload);
        apply_action(&mut session, Action::Reload);
        assert_eq!(session.cache_stats().dispatched, 1);

        gate.notify_one();
        assert!(session.settle().await.is_ready());
        assert_eq!(session.orchestrator().service().calls(), 1);
    }

    #[tokio::test]
    async fn test_quit() {
        let mut session = session();
        assert_eq!(apply_action(&mut session, Action::Quit), ActionOutcome::Quit);
    }
}
