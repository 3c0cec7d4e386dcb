// src/teletext_ui/page.rs - The top scorers teletext page

use crossterm::execute;
use crossterm::style::{Color, Print};
use std::io::{Stdout, Write};

use super::colors::*;
use super::formatting::{format_expected_goals, format_minutes, pad_right, season_label, truncate};
use super::loading_indicator::LoadingIndicator;
use crate::constants::ui::{CONTENT_MARGIN, DEFAULT_WIDTH, PAGE_NUMBER, PLAYER_COLUMN_WIDTH};
use crate::data_fetcher::models::ResultSet;
use crate::error::AppError;
use crate::projection::{DerivedStats, Podium, ranked_rows};
use crate::selection::{ParameterStore, Selection, SelectorState};
use crate::view_state::ViewState;

const TITLE: &str = "TOP SCORERS";
const TITLE_WIDTH: usize = 20;

/// Snapshot of everything the page shows, rendered in one buffered write.
#[derive(Debug, Clone)]
pub struct LeaderboardPage {
    page_number: u16,
    competitions: Vec<String>,
    seasons: Vec<i32>,
    selection: Selection,
    selectors: SelectorState,
    view: ViewState,
    endpoint: String,
    loading: LoadingIndicator,
    plain: bool,
    interactive: bool,
}

impl LeaderboardPage {
    pub fn new(store: &ParameterStore, view: &ViewState, endpoint: impl Into<String>) -> Self {
        Self {
            page_number: PAGE_NUMBER,
            competitions: store
                .catalog()
                .competitions()
                .iter()
                .map(|c| c.name.clone())
                .collect(),
            seasons: store.catalog().seasons().to_vec(),
            selection: store.selection().clone(),
            selectors: store.selectors(),
            view: view.clone(),
            endpoint: endpoint.into(),
            loading: LoadingIndicator::new(),
            plain: false,
            interactive: false,
        }
    }

    /// Renders without ANSI colours
    pub fn with_plain(mut self, plain: bool) -> Self {
        self.plain = plain;
        self
    }

    /// Interactive pages clear the screen, use the terminal width and show key hints
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Refreshes the snapshot from the current session state
    pub fn update(&mut self, store: &ParameterStore, view: &ViewState) {
        if !view.is_loading() {
            self.loading.reset();
        }
        self.selection = store.selection().clone();
        self.selectors = store.selectors();
        self.view = view.clone();
    }

    pub fn is_loading(&self) -> bool {
        self.view.is_loading()
    }

    /// Advances the spinner while loading
    pub fn tick(&mut self) {
        if self.view.is_loading() {
            self.loading.next_frame();
        }
    }

    fn paint(&self, text: &str, fg: Color) -> String {
        if self.plain {
            text.to_string()
        } else {
            format!("\x1b[38;5;{}m{}\x1b[0m", ansi_code(fg, 231), text)
        }
    }

    fn paint_on(&self, text: &str, fg: Color, bg: Color) -> String {
        if self.plain {
            text.to_string()
        } else {
            format!(
                "\x1b[48;5;{}m\x1b[38;5;{}m{}\x1b[0m",
                ansi_code(bg, 21),
                ansi_code(fg, 231),
                text
            )
        }
    }

    /// Page content, one entry per screen line
    pub fn lines(&self, width: usize) -> Vec<String> {
        let mut lines = Vec::with_capacity(32);
        let right_width = width.saturating_sub(TITLE_WIDTH);

        // Header
        let title = format!("{TITLE:<TITLE_WIDTH$}");
        let header = format!(
            "{:>right_width$}",
            format!("{} {}", self.selection.competition, self.page_number)
        );
        lines.push(format!(
            "{}{}",
            self.paint_on(&title, header_fg(), title_bg()),
            self.paint_on(&header, text_fg(), header_bg())
        ));

        // Subheader with the summary cards
        let (competitions, seasons) = match &self.view {
            ViewState::Ready { results, .. } => (
                results.competitions_count.to_string(),
                results.seasons_count.to_string(),
            ),
            _ => ("-".to_string(), "-".to_string()),
        };
        let cards = format!("Competitions {competitions}  Seasons {seasons}");
        lines.push(self.paint(
            &format!(
                "{:<TITLE_WIDTH$}{:>right_width$}",
                season_label(self.selection.season_end_year),
                cards
            ),
            subheader_fg(),
        ));
        lines.push(String::new());

        self.push_selectors(&mut lines);
        lines.push(String::new());

        let margin = " ".repeat(CONTENT_MARGIN);
        for line in self.body_lines() {
            lines.push(format!("{margin}{line}"));
        }

        if self.interactive {
            lines.push(String::new());
            lines.push(self.paint(
                "←→ league  1-9 pick  l leagues  s season  r retry  q quit",
                hint_fg(),
            ));
        }

        lines
    }

    fn push_selectors(&self, lines: &mut Vec<String>) {
        let bar = self
            .competitions
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let label = format!("{} {}", i + 1, name);
                if *name == self.selection.competition {
                    self.paint(&format!("[{label}]"), selected_fg())
                } else {
                    self.paint(&format!(" {label} "), text_fg())
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(bar);

        if self.selectors.league_open {
            for (i, name) in self.competitions.iter().enumerate() {
                let marker = if *name == self.selection.competition { ">" } else { " " };
                lines.push(self.paint(&format!("  {marker} {} {name}", i + 1), text_fg()));
            }
        }

        lines.push(self.paint(
            &format!(
                "Season: {}  (s to change)",
                season_label(self.selection.season_end_year)
            ),
            text_fg(),
        ));

        if self.selectors.season_open {
            for (i, year) in self.seasons.iter().enumerate() {
                let marker = if i == self.selectors.season_cursor { ">" } else { " " };
                let current = if *year == self.selection.season_end_year { "*" } else { " " };
                let color = if i == self.selectors.season_cursor {
                    selected_fg()
                } else {
                    text_fg()
                };
                lines.push(self.paint(
                    &format!("  {marker} {}{current}", season_label(*year)),
                    color,
                ));
            }
        }
    }

    fn body_lines(&self) -> Vec<String> {
        let key = self.view.key();
        match &self.view {
            ViewState::Loading { .. } => vec![self.paint(
                &format!(
                    "{} Loading {} data…",
                    self.loading.current_frame(),
                    key.competition()
                ),
                text_fg(),
            )],
            ViewState::Error { error, .. } => vec![
                self.paint(&format!("Error: {error}"), error_fg()),
                String::new(),
                self.paint(
                    &format!("Make sure the scorer service is running at {}", self.endpoint),
                    text_fg(),
                ),
            ],
            ViewState::Empty { .. } => vec![
                self.paint(
                    &format!(
                        "No data available for {} {}",
                        key.competition(),
                        key.season_end_year()
                    ),
                    text_fg(),
                ),
                self.paint("Try selecting a different season or league", text_fg()),
            ],
            ViewState::Ready { results, stats, .. } => self.table_lines(results, stats),
        }
    }

    fn table_lines(&self, results: &ResultSet, stats: &DerivedStats) -> Vec<String> {
        let mut lines = Vec::with_capacity(results.len() + 6);
        lines.push(self.paint(
            &format!(
                "{:>4} {} {:<6} {:>5} {:>7} {:>5} {:>7}",
                "Rank",
                pad_right("Player", PLAYER_COLUMN_WIDTH),
                "Nation",
                "Goals",
                "Assists",
                "xG",
                "Minutes"
            ),
            subheader_fg(),
        ));

        for row in ranked_rows(results) {
            let player = row.player;
            let color = match row.podium() {
                Some(Podium::Gold) => gold_fg(),
                Some(Podium::Silver) => silver_fg(),
                Some(Podium::Bronze) => bronze_fg(),
                None => text_fg(),
            };
            lines.push(self.paint(
                &format!(
                    "{:>4} {} {:<6} {:>5} {:>7} {:>5} {:>7}",
                    row.rank,
                    pad_right(&truncate(&player.name, PLAYER_COLUMN_WIDTH), PLAYER_COLUMN_WIDTH),
                    truncate(&player.nation, 6),
                    player.goals,
                    player.assists,
                    format_expected_goals(player.expected_goals),
                    format_minutes(player.minutes_played)
                ),
                color,
            ));
        }

        lines.push(String::new());
        let n = stats.sample_size;
        if let (Some(name), Some(goals)) = (&stats.top_scorer_name, stats.top_scorer_goals) {
            lines.push(self.paint(&format!("Top Scorer: {name} ({goals})"), stat_fg()));
        }
        lines.push(self.paint(
            &format!("Total Goals (Top {n}): {}", stats.total_goals_top_n),
            stat_fg(),
        ));
        if let Some(average) = stats.average_expected_goals_top_n {
            lines.push(self.paint(
                &format!("Average xG (Top {n}): {}", format_expected_goals(average)),
                stat_fg(),
            ));
        }
        lines
    }

    /// Whole page as text, lines separated by newlines
    pub fn render_to_string(&self, width: usize) -> String {
        let mut out = self.lines(width).join("\n");
        out.push('\n');
        out
    }

    /// Writes the page to the terminal in one operation.
    ///
    /// Interactive pages are drawn from the top of a cleared screen at the
    /// terminal width; others are printed inline at the default width.
    pub fn render_buffered(&self, stdout: &mut Stdout) -> Result<(), AppError> {
        if !self.interactive {
            execute!(stdout, Print(self.render_to_string(DEFAULT_WIDTH)))?;
            stdout.flush()?;
            return Ok(());
        }

        // Hide cursor to prevent visual artifacts during rendering
        execute!(stdout, crossterm::cursor::Hide)?;
        let (width, _) = crossterm::terminal::size()?;

        let lines = self.lines(width as usize);
        let mut buffer = String::with_capacity(lines.iter().map(|l| l.len() + 12).sum::<usize>() + 16);
        buffer.push_str("\x1b[H"); // Move to home position
        buffer.push_str("\x1b[0J"); // Clear from cursor down
        for (i, line) in lines.iter().enumerate() {
            buffer.push_str(&format!("\x1b[{};1H{}", i + 1, line));
        }

        // Write entire buffer in one operation (minimizes flicker)
        execute!(stdout, Print(buffer))?;
        execute!(stdout, crossterm::cursor::Show)?;
        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::cache::CacheEntry;
    use crate::selection::{Catalog, Selector};
    use crate::testing_utils::TestDataBuilder;

    const ENDPOINT: &str = "http://localhost:4000/graphql";

    fn page_for(store: &ParameterStore, entry: &CacheEntry) -> String {
        LeaderboardPage::new(store, &ViewState::from_entry(entry), ENDPOINT)
            .with_plain(true)
            .render_to_string(DEFAULT_WIDTH)
    }

    fn store() -> ParameterStore {
        ParameterStore::with_defaults(Catalog::builtin())
    }

    #[test]
    fn test_loading_page() {
        let store = store();
        let text = page_for(&store, &CacheEntry::pending(store.query_key()));
        assert!(text.contains("TOP SCORERS"));
        assert!(text.contains("Premier League 235"));
        assert!(text.contains("| Loading Premier League data…"));
        assert!(text.contains("Competitions -  Seasons -"));
    }

    #[test]
    fn test_error_page_shows_message_verbatim() {
        let store = store();
        let entry = TestDataBuilder::create_failure_entry("Premier League", 2024, "service unavailable");
        let text = page_for(&store, &entry);
        assert!(text.contains("Error: service unavailable"));
        assert!(text.contains(ENDPOINT));
        // No internal key representation
        assert!(!text.contains("Premier League/2024"));
    }

    #[test]
    fn test_empty_page() {
        let store = store();
        let entry = TestDataBuilder::create_success_entry(
            "Premier League",
            2024,
            TestDataBuilder::create_empty_result_set(),
        );
        let text = page_for(&store, &entry);
        assert!(text.contains("No data available for Premier League 2024"));
        assert!(!text.contains("No data available for Premier League 2023/2024"));
        assert!(text.contains("Try selecting a different season or league"));
        assert!(!text.contains("Error:"));
    }

    #[test]
    fn test_ready_page_table_and_stats() {
        let store = store();
        let entry = TestDataBuilder::create_success_entry(
            "Premier League",
            2024,
            TestDataBuilder::premier_league_2024(),
        );
        let text = page_for(&store, &entry);

        assert!(text.contains("Rank"));
        assert!(text.contains("Minutes"));
        assert!(text.contains("Erling Haaland"));
        assert!(text.contains("2,552"));
        assert!(text.contains("29.2"));
        assert!(text.contains("Competitions 5  Seasons 7"));
        assert!(text.contains("Top Scorer: Erling Haaland (27)"));
        assert!(text.contains("Total Goals (Top 3): 70"));
        // (29.2 + 15.1 + 20.3) / 3 = 21.53
        assert!(text.contains("Average xG (Top 3): 21.5"));

        // Upstream order is kept
        let haaland = text.find("Erling Haaland (27)").unwrap();
        let first_row = text.find("   1 Erling Haaland").unwrap();
        let third_row = text.find("   3 Alexander Isak").unwrap();
        assert!(first_row < third_row);
        assert!(third_row < haaland);
    }

    #[test]
    fn test_selected_league_is_marked() {
        let mut store = store();
        store.set_competition("Serie A").unwrap();
        let text = page_for(&store, &CacheEntry::pending(store.query_key()));
        assert!(text.contains("[4 Serie A]"));
        assert!(text.contains(" 1 Premier League "));
    }

    #[test]
    fn test_open_season_selector_lists_seasons() {
        let mut store = store();
        store.toggle(Selector::Season);
        store.move_season_cursor(2);
        let text = page_for(&store, &CacheEntry::pending(store.query_key()));
        assert!(text.contains("    2023/2024*"));
        assert!(text.contains("  > 2021/2022 "));
        assert!(text.contains("2017/2018"));
    }

    #[test]
    fn test_colours_unless_plain() {
        let store = store();
        let view = ViewState::from_entry(&CacheEntry::pending(store.query_key()));
        let coloured = LeaderboardPage::new(&store, &view, ENDPOINT).render_to_string(DEFAULT_WIDTH);
        assert!(coloured.contains("\x1b[38;5;"));

        let plain = LeaderboardPage::new(&store, &view, ENDPOINT)
            .with_plain(true)
            .render_to_string(DEFAULT_WIDTH);
        assert!(!plain.contains('\x1b'));
    }

    #[test]
    fn test_key_hints_only_when_interactive() {
        let store = store();
        let view = ViewState::from_entry(&CacheEntry::pending(store.query_key()));
        let page = LeaderboardPage::new(&store, &view, ENDPOINT).with_plain(true);
        assert!(!page.render_to_string(DEFAULT_WIDTH).contains("q quit"));
        let page = page.with_interactive(true);
        assert!(page.render_to_string(DEFAULT_WIDTH).contains("q quit"));
    }

    #[test]
    fn test_spinner_advances_only_while_loading() {
        let store = store();
        let view = ViewState::from_entry(&CacheEntry::pending(store.query_key()));
        let mut page = LeaderboardPage::new(&store, &view, ENDPOINT).with_plain(true);
        page.tick();
        assert!(page.render_to_string(DEFAULT_WIDTH).contains("/ Loading"));

        let ready = ViewState::from_entry(&TestDataBuilder::create_success_entry(
            "Premier League",
            2024,
            TestDataBuilder::premier_league_2024(),
        ));
        page.update(&store, &ready);
        page.tick();
        assert!(!page.is_loading());
    }
}
