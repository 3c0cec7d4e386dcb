use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

use crate::data_fetcher::api::{ScorerRequest, ScorerService};
use crate::data_fetcher::cache::CacheEntry;
use crate::data_fetcher::models::{PlayerRow, ResultSet};
use crate::error::{AppError, ErrorInfo};
use crate::selection::{QueryKey, Selection, derive_key};

/// Test utilities for creating mock data and testing scenarios
pub struct TestDataBuilder;

impl TestDataBuilder {
    /// Creates a player row with the given season stats
    pub fn create_player(
        name: &str,
        nation: &str,
        goals: u32,
        assists: u32,
        minutes_played: u32,
        expected_goals: f64,
    ) -> PlayerRow {
        PlayerRow {
            name: name.to_string(),
            nation: nation.to_string(),
            goals,
            assists,
            minutes_played,
            expected_goals,
        }
    }

    /// Wraps rows into a result set over the built-in catalog sizes
    pub fn create_result_set(players: Vec<PlayerRow>) -> ResultSet {
        ResultSet {
            competitions_count: 5,
            seasons_count: 7,
            players,
        }
    }

    /// Creates a result set with no scorers
    pub fn create_empty_result_set() -> ResultSet {
        Self::create_result_set(Vec::new())
    }

    /// Creates `count` players with strictly decreasing goal totals
    pub fn create_multiple_players(count: usize) -> Vec<PlayerRow> {
        (0..count)
            .map(|i| {
                let goals = (count - i) as u32 * 2;
                Self::create_player(
                    &format!("Player {i}"),
                    "ENG",
                    goals,
                    i as u32,
                    3000 - (i as u32 * 100),
                    goals as f64 * 0.9,
                )
            })
            .collect()
    }

    pub fn premier_league_2024() -> ResultSet {
        Self::create_result_set(vec![
            Self::create_player("Erling Haaland", "NOR", 27, 5, 2552, 29.2),
            Self::create_player("Cole Palmer", "ENG", 22, 11, 2620, 15.1),
            Self::create_player("Alexander Isak", "SWE", 21, 2, 2197, 20.3),
        ])
    }

    pub fn la_liga_2023() -> ResultSet {
        Self::create_result_set(vec![
            Self::create_player("Robert Lewandowski", "POL", 23, 7, 2884, 22.1),
            Self::create_player("Joselu", "ESP", 16, 2, 2960, 14.3),
        ])
    }

    /// Key of a competition/season pair
    pub fn create_key(competition: &str, season_end_year: i32) -> QueryKey {
        derive_key(&Selection::new(competition, season_end_year))
    }

    pub fn create_success_entry(competition: &str, season_end_year: i32, results: ResultSet) -> CacheEntry {
        CacheEntry::success(Self::create_key(competition, season_end_year), Arc::new(results))
    }

    pub fn create_failure_entry(competition: &str, season_end_year: i32, message: &str) -> CacheEntry {
        CacheEntry::failure(
            Self::create_key(competition, season_end_year),
            ErrorInfo::new(message),
        )
    }
}

type ScriptKey = (String, i32);

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory [`ScorerService`] with scripted responses.
///
/// Responses are keyed by competition and season. A key can be held with
/// [`ScriptedScorerService::hold`] so that its next request stays pending
/// until the returned gate is notified. Requests without a scripted response
/// fail with a GraphQL-style error.
#[derive(Debug, Default)]
pub struct ScriptedScorerService {
    responses: Mutex<HashMap<ScriptKey, Result<ResultSet, String>>>,
    gates: Mutex<HashMap<ScriptKey, Arc<Notify>>>,
    requests: Mutex<Vec<ScorerRequest>>,
}

impl ScriptedScorerService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a successful response
    pub fn respond_with(&self, competition: &str, season_end_year: i32, results: ResultSet) {
        lock(&self.responses).insert((competition.to_string(), season_end_year), Ok(results));
    }

    /// Scripts a failure carrying `message` verbatim
    pub fn fail_with(&self, competition: &str, season_end_year: i32, message: &str) {
        lock(&self.responses).insert(
            (competition.to_string(), season_end_year),
            Err(message.to_string()),
        );
    }

    /// Holds the next request for the key until the returned gate is notified
    pub fn hold(&self, competition: &str, season_end_year: i32) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        lock(&self.gates).insert((competition.to_string(), season_end_year), Arc::clone(&gate));
        gate
    }

    /// Total number of requests received
    pub fn calls(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Number of requests received for one key
    pub fn calls_for(&self, competition: &str, season_end_year: i32) -> usize {
        lock(&self.requests)
            .iter()
            .filter(|r| r.competition == competition && r.season_end_year == season_end_year)
            .count()
    }

    /// Every request received, in arrival order
    pub fn requests(&self) -> Vec<ScorerRequest> {
        lock(&self.requests).clone()
    }
}

impl ScorerService for ScriptedScorerService {
    async fn fetch_top_scorers(&self, request: &ScorerRequest) -> Result<ResultSet, AppError> {
        let key = (request.competition.clone(), request.season_end_year);
        lock(&self.requests).push(request.clone());

        let gate = lock(&self.gates).remove(&key);
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let response = lock(&self.responses).get(&key).cloned();
        match response {
            Some(Ok(results)) => Ok(results),
            Some(Err(message)) => Err(AppError::api_graphql(message)),
            None => Err(AppError::api_graphql(format!(
                "No scripted response for {} {}",
                request.competition, request.season_end_year
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_player() {
        let player = TestDataBuilder::create_player("Kylian Mbappé", "FRA", 27, 7, 2716, 24.4);
        assert_eq!(player.name, "Kylian Mbappé");
        assert_eq!(player.goals, 27);
        assert_eq!(player.expected_goals, 24.4);
    }

    #[test]
    fn test_create_multiple_players_descending() {
        let players = TestDataBuilder::create_multiple_players(5);
        assert_eq!(players.len(), 5);
        assert!(players.windows(2).all(|w| w[0].goals > w[1].goals));
    }

    #[test]
    fn test_fixtures_are_non_empty() {
        assert_eq!(TestDataBuilder::premier_league_2024().len(), 3);
        assert_eq!(TestDataBuilder::la_liga_2023().len(), 2);
        assert!(TestDataBuilder::create_empty_result_set().is_empty());
    }

    #[tokio::test]
    async fn test_scripted_service_responses() {
        let service = ScriptedScorerService::new();
        service.respond_with("La Liga", 2023, TestDataBuilder::la_liga_2023());
        service.fail_with("Serie A", 2021, "service unavailable");

        let ok = service
            .fetch_top_scorers(&ScorerRequest::from_key(
                &TestDataBuilder::create_key("La Liga", 2023),
                10,
            ))
            .await
            .unwrap();
        assert_eq!(ok.len(), 2);

        let err = service
            .fetch_top_scorers(&ScorerRequest::from_key(
                &TestDataBuilder::create_key("Serie A", 2021),
                10,
            ))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "service unavailable");

        let unscripted = service
            .fetch_top_scorers(&ScorerRequest::from_key(
                &TestDataBuilder::create_key("Ligue 1", 2019),
                10,
            ))
            .await;
        assert!(unscripted.is_err());

        assert_eq!(service.calls(), 3);
        assert_eq!(service.calls_for("La Liga", 2023), 1);
    }

    #[tokio::test]
    async fn test_hold_delays_next_request_only() {
        let service = Arc::new(ScriptedScorerService::new());
        service.respond_with("Bundesliga", 2022, TestDataBuilder::la_liga_2023());
        let gate = service.hold("Bundesliga", 2022);
        let request = ScorerRequest::from_key(&TestDataBuilder::create_key("Bundesliga", 2022), 10);

        let task = {
            let service = Arc::clone(&service);
            let request = request.clone();
            tokio::spawn(async move { service.fetch_top_scorers(&request).await })
        };
        gate.notify_one();
        assert!(task.await.unwrap().is_ok());

        // Gate is consumed, so the next request is not held
        assert!(service.fetch_top_scorers(&request).await.is_ok());
    }
}
