use crate::constants::catalog::{COMPETITIONS, SEASONS};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::store::Selection;

/// A selectable competition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competition {
    /// Display name, also the value sent to the scorer service
    pub name: String,
    #[serde(default)]
    pub country: String,
    /// Short identifier, e.g. "ENG"
    #[serde(default)]
    pub code: String,
}

impl Competition {
    pub fn new(name: impl Into<String>, country: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            code: code.into(),
        }
    }

    /// Matches the display name or the short code, ignoring ASCII case
    fn matches(&self, value: &str) -> bool {
        let value = value.trim();
        self.name.eq_ignore_ascii_case(value)
            || (!self.code.is_empty() && self.code.eq_ignore_ascii_case(value))
    }
}

/// Closed set of competitions and seasons a selection may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    competitions: Vec<Competition>,
    seasons: Vec<i32>,
}

impl Catalog {
    /// Builds a catalog, rejecting empty lists and duplicates.
    pub fn new(competitions: Vec<Competition>, seasons: Vec<i32>) -> Result<Self, AppError> {
        if competitions.is_empty() {
            return Err(AppError::config_error("At least one competition is required"));
        }
        if seasons.is_empty() {
            return Err(AppError::config_error("At least one season is required"));
        }

        let mut names = HashSet::new();
        for competition in &competitions {
            if competition.name.trim().is_empty() {
                return Err(AppError::config_error("Competition name cannot be empty"));
            }
            if !names.insert(competition.name.to_lowercase()) {
                return Err(AppError::config_error(format!(
                    "Duplicate competition: {}",
                    competition.name
                )));
            }
        }

        let mut years = HashSet::new();
        if let Some(duplicate) = seasons.iter().find(|year| !years.insert(**year)) {
            return Err(AppError::config_error(format!(
                "Duplicate season: {duplicate}"
            )));
        }

        Ok(Self {
            competitions,
            seasons,
        })
    }

    /// The five big European leagues, seasons 2018-2024
    pub fn builtin() -> Self {
        Self {
            competitions: COMPETITIONS
                .iter()
                .map(|(name, country, code)| Competition::new(*name, *country, *code))
                .collect(),
            seasons: SEASONS.to_vec(),
        }
    }

    pub fn competitions(&self) -> &[Competition] {
        &self.competitions
    }

    pub fn seasons(&self) -> &[i32] {
        &self.seasons
    }

    /// Looks up a competition by name or code
    pub fn find_competition(&self, value: &str) -> Option<&Competition> {
        self.competitions.iter().find(|c| c.matches(value))
    }

    pub fn competition_index(&self, name: &str) -> Option<usize> {
        self.competitions.iter().position(|c| c.name == name)
    }

    pub fn contains_season(&self, year: i32) -> bool {
        self.seasons.contains(&year)
    }

    pub fn season_index(&self, year: i32) -> Option<usize> {
        self.seasons.iter().position(|s| *s == year)
    }

    /// Latest season end year in the catalog
    pub fn most_recent_season(&self) -> i32 {
        // Non-empty by construction
        self.seasons.iter().copied().max().unwrap_or_default()
    }

    /// Initial selection: the requested values when given, otherwise the
    /// first competition and the most recent season.
    pub fn initial_selection(
        &self,
        competition: Option<&str>,
        season: Option<i32>,
    ) -> Result<Selection, AppError> {
        let competition = match competition {
            Some(value) => self
                .find_competition(value)
                .ok_or_else(|| AppError::invalid_parameter("competition", value))?,
            None => &self.competitions[0],
        };

        let season = match season {
            Some(year) if self.contains_season(year) => year,
            Some(year) => return Err(AppError::invalid_parameter("season", year)),
            None => self.most_recent_season(),
        };

        Ok(Selection::new(competition.name.clone(), season))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
