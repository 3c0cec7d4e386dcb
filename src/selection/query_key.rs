use std::fmt;

use super::store::Selection;

/// Cache and request key for one selection.
///
/// Built only through [`derive_key`], so two keys are equal exactly when
/// their selections are.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    competition: String,
    season_end_year: i32,
}

impl QueryKey {
    pub fn competition(&self) -> &str {
        &self.competition
    }

    pub fn season_end_year(&self) -> i32 {
        self.season_end_year
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.competition, self.season_end_year)
    }
}

/// Maps a selection to its query key. Pure and total.
pub fn derive_key(selection: &Selection) -> QueryKey {
    QueryKey {
        competition: selection.competition.clone(),
        season_end_year: selection.season_end_year,
    }
}
