//! Parameter store for the active competition/season selection
//!
//! Mutations are validated against the [`Catalog`]. An accepted mutation
//! closes any open selector before the new [`QueryKey`] is derived, so the
//! caller never sees a key computed from a half-updated selection.

use crate::error::AppError;
use tracing::{debug, warn};

use super::catalog::Catalog;
use super::query_key::{QueryKey, derive_key};

/// Current query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selection {
    pub competition: String,
    pub season_end_year: i32,
}

impl Selection {
    pub fn new(competition: impl Into<String>, season_end_year: i32) -> Self {
        Self {
            competition: competition.into(),
            season_end_year,
        }
    }
}

/// The two selector widgets of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    League,
    Season,
}

/// Open/closed state of the selectors. UI only, never part of the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectorState {
    pub league_open: bool,
    pub season_open: bool,
    /// Highlighted row in the season list while it is open
    pub season_cursor: usize,
}

impl SelectorState {
    pub fn is_open(&self, selector: Selector) -> bool {
        match selector {
            Selector::League => self.league_open,
            Selector::Season => self.season_open,
        }
    }

    pub fn any_open(&self) -> bool {
        self.league_open || self.season_open
    }
}

#[derive(Debug, Clone)]
pub struct ParameterStore {
    catalog: Catalog,
    selection: Selection,
    selectors: SelectorState,
}

impl ParameterStore {
    /// Creates a store with an explicit initial selection, which must be in the catalog.
    pub fn new(catalog: Catalog, selection: Selection) -> Result<Self, AppError> {
        if catalog.competition_index(&selection.competition).is_none() {
            return Err(AppError::invalid_parameter(
                "competition",
                &selection.competition,
            ));
        }
        if !catalog.contains_season(selection.season_end_year) {
            return Err(AppError::invalid_parameter(
                "season",
                selection.season_end_year,
            ));
        }

        Ok(Self {
            catalog,
            selection,
            selectors: SelectorState::default(),
        })
    }

    /// Creates a store on the catalog's default selection
    pub fn with_defaults(catalog: Catalog) -> Self {
        let selection = Selection::new(
            catalog.competitions()[0].name.clone(),
            catalog.most_recent_season(),
        );
        Self {
            catalog,
            selection,
            selectors: SelectorState::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selectors(&self) -> SelectorState {
        self.selectors
    }

    /// Key for the current selection
    pub fn query_key(&self) -> QueryKey {
        derive_key(&self.selection)
    }

    /// Selects a competition by name or code.
    ///
    /// Unknown values leave the selection and the selectors untouched.
    pub fn set_competition(&mut self, value: &str) -> Result<QueryKey, AppError> {
        let Some(competition) = self.catalog.find_competition(value) else {
            warn!("Rejected unknown competition: {value}");
            return Err(AppError::invalid_parameter("competition", value));
        };
        let name = competition.name.clone();

        self.close_selectors();
        debug!("Competition selected: {name}");
        self.selection.competition = name;
        Ok(self.query_key())
    }

    /// Selects a season by end year.
    pub fn set_season(&mut self, year: i32) -> Result<QueryKey, AppError> {
        if !self.catalog.contains_season(year) {
            warn!("Rejected unknown season: {year}");
            return Err(AppError::invalid_parameter("season", year));
        }

        self.close_selectors();
        debug!("Season selected: {year}");
        self.selection.season_end_year = year;
        Ok(self.query_key())
    }

    /// Moves to the next competition in catalog order, wrapping around
    pub fn next_competition(&mut self) -> Result<QueryKey, AppError> {
        self.step_competition(1)
    }

    /// Moves to the previous competition in catalog order, wrapping around
    pub fn previous_competition(&mut self) -> Result<QueryKey, AppError> {
        self.step_competition(-1)
    }

    fn step_competition(&mut self, step: isize) -> Result<QueryKey, AppError> {
        let count = self.catalog.competitions().len() as isize;
        let current = self
            .catalog
            .competition_index(&self.selection.competition)
            .unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(count) as usize;
        let name = self.catalog.competitions()[next].name.clone();
        self.set_competition(&name)
    }

    /// Opens or closes a selector. Opening one closes the other.
    pub fn toggle(&mut self, selector: Selector) {
        let open = !self.selectors.is_open(selector);
        self.selectors.league_open = false;
        self.selectors.season_open = false;
        match selector {
            Selector::League => self.selectors.league_open = open,
            Selector::Season => {
                self.selectors.season_open = open;
                self.selectors.season_cursor = self
                    .catalog
                    .season_index(self.selection.season_end_year)
                    .unwrap_or(0);
            }
        }
    }

    pub fn close_selectors(&mut self) {
        self.selectors.league_open = false;
        self.selectors.season_open = false;
    }

    /// Moves the season highlight by `delta` rows, clamped to the list
    pub fn move_season_cursor(&mut self, delta: isize) {
        let last = self.catalog.seasons().len().saturating_sub(1) as isize;
        let cursor = (self.selectors.season_cursor as isize + delta).clamp(0, last);
        self.selectors.season_cursor = cursor as usize;
    }

    pub fn highlighted_season(&self) -> Option<i32> {
        self.catalog
            .seasons()
            .get(self.selectors.season_cursor)
            .copied()
    }
}
