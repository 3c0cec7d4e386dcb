/// One leaderboard row, in the order the scorer service ranked it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerRow {
    pub name: String,
    pub nation: String,
    pub goals: u32,
    pub assists: u32,
    pub minutes_played: u32,
    pub expected_goals: f64,
}

/// Successful payload for one competition/season query.
///
/// `players` keeps the upstream ranking; nothing in the crate re-sorts it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSet {
    /// Number of competitions the service knows about
    pub competitions_count: usize,
    /// Number of seasons the service knows about
    pub seasons_count: usize,
    pub players: Vec<PlayerRow>,
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }
}
