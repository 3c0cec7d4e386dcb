//! Main interactive loop
//!
//! The loop owns the terminal and drives the session: it polls for keys,
//! applies them, picks up fetches that completed in the background and
//! redraws the page whenever the view state or the selectors changed.

use crate::data_fetcher::api::ScorerService;
use crate::error::AppError;
use crate::session::DashboardSession;
use crate::teletext_ui::LeaderboardPage;
use crate::view_state::ViewState;
use crossterm::event::{self, Event};
use std::io::Stdout;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::input_handler::{ActionOutcome, apply_action, map_key};
use super::refresh_manager::calculate_poll_interval;
use super::terminal_manager::TerminalManager;

const SPINNER_INTERVAL: Duration = Duration::from_millis(120);

/// Runs the interactive UI with adaptive polling until the user quits.
///
/// The terminal is restored even when the loop fails.
pub async fn run_interactive_ui<S: ScorerService>(
    session: &mut DashboardSession<S>,
    endpoint: &str,
    debug_mode: bool,
) -> Result<(), AppError> {
    let terminal = TerminalManager::new(debug_mode);
    let mut stdout = terminal.setup_terminal()?;

    let result = event_loop(session, &mut stdout, endpoint).await;

    terminal.cleanup_terminal(stdout)?;
    let stats = session.cache_stats();
    info!(
        "Interactive session ended: {} cached entries, {} requests, {} cache hits, {} joined",
        stats.size, stats.dispatched, stats.hits, stats.joined
    );
    result
}

async fn event_loop<S: ScorerService>(
    session: &mut DashboardSession<S>,
    stdout: &mut Stdout,
    endpoint: &str,
) -> Result<(), AppError> {
    let view_changed = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&view_changed);
    session.subscribe(move |state: &ViewState| {
        debug!("View changed to {} for {}", state.label(), state.key());
        flag.store(true, Ordering::Relaxed);
    });

    session.start();
    let mut page = LeaderboardPage::new(session.store(), session.view(), endpoint)
        .with_interactive(true);
    let mut needs_render = true;
    let mut last_activity = Instant::now();
    let mut last_spinner = Instant::now();

    loop {
        // Completions of background fetches for the active key
        session.sync();

        if view_changed.swap(false, Ordering::Relaxed) || needs_render {
            page.update(session.store(), session.view());
            page.render_buffered(stdout)?;
            needs_render = false;
        }

        if page.is_loading() && last_spinner.elapsed() >= SPINNER_INTERVAL {
            page.tick();
            last_spinner = Instant::now();
            needs_render = true;
        }

        let poll_interval = calculate_poll_interval(last_activity.elapsed(), page.is_loading());
        if event::poll(poll_interval)? {
            match event::read()? {
                Event::Key(key_event) => {
                    if let Some(action) = map_key(&key_event, session.store().selectors()) {
                        last_activity = Instant::now();
                        if apply_action(session, action) == ActionOutcome::Quit {
                            break;
                        }
                        // Selector changes do not touch the view state
                        needs_render = true;
                    }
                }
                Event::Resize(_, _) => needs_render = true,
                _ => {}
            }
        }

        // Give spawned fetches a chance to run on this worker
        tokio::task::yield_now().await;
    }

    Ok(())
}
