//! Summary statistics computed from a fetched result set
//!
//! Everything here is pure and recomputed on demand. Values keep full
//! precision; rounding belongs to the presentation layer.

use crate::data_fetcher::models::{PlayerRow, ResultSet};

/// Statistics derived from one [`ResultSet`].
///
/// "Top N" means the whole returned sequence, whatever its length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DerivedStats {
    /// Name of the first-ranked player
    pub top_scorer_name: Option<String>,
    pub top_scorer_goals: Option<u32>,
    /// Widened so no upstream goal counts can overflow it
    pub total_goals_top_n: u64,
    /// Mean expected goals, absent for an empty sequence
    pub average_expected_goals_top_n: Option<f64>,
    /// Number of players the figures are computed over
    pub sample_size: usize,
}

impl DerivedStats {
    pub fn has_top_scorer(&self) -> bool {
        self.top_scorer_name.is_some()
    }
}

/// Projects a result set into [`DerivedStats`].
///
/// The first row is the top scorer as ranked upstream; rows are never re-sorted.
pub fn project(results: &ResultSet) -> DerivedStats {
    let players = &results.players;
    let top = players.first();

    let total_goals_top_n = players.iter().map(|p| u64::from(p.goals)).sum();
    let average_expected_goals_top_n = if players.is_empty() {
        None
    } else {
        let total: f64 = players.iter().map(|p| p.expected_goals).sum();
        Some(total / players.len() as f64)
    };

    DerivedStats {
        top_scorer_name: top.map(|p| p.name.clone()),
        top_scorer_goals: top.map(|p| p.goals),
        total_goals_top_n,
        average_expected_goals_top_n,
        sample_size: players.len(),
    }
}

/// A player row with its display rank
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedRow<'a> {
    /// 1-based position in upstream order
    pub rank: usize,
    pub player: &'a PlayerRow,
}

impl RankedRow<'_> {
    /// Podium place for the top three ranks
    pub fn podium(&self) -> Option<Podium> {
        match self.rank {
            1 => Some(Podium::Gold),
            2 => Some(Podium::Silver),
            3 => Some(Podium::Bronze),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Podium {
    Gold,
    Silver,
    Bronze,
}

/// Rows in upstream order, ranked by position
pub fn ranked_rows(results: &ResultSet) -> impl Iterator<Item = RankedRow<'_>> {
    results
        .players
        .iter()
        .enumerate()
        .map(|(index, player)| RankedRow {
            rank: index + 1,
            player,
        })
}
