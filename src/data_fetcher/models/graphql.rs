//! Wire types of the scorer service's GraphQL API

use serde::{Deserialize, Serialize};

use super::results::{PlayerRow, ResultSet};

/// Request body posted to the GraphQL endpoint
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a, V: Serialize> {
    pub query: &'a str,
    #[serde(rename = "operationName")]
    pub operation_name: &'a str,
    pub variables: V,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardVariables {
    pub competition: String,
    #[serde(rename = "seasonEndYear")]
    pub season_end_year: i32,
    pub limit: u32,
}

/// Standard GraphQL response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DashboardData {
    #[serde(default)]
    pub competitions: Vec<String>,
    #[serde(default)]
    pub seasons: Vec<i32>,
    #[serde(rename = "topScorers", default)]
    pub top_scorers: Vec<TopScorer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopScorer {
    pub name: String,
    #[serde(default)]
    pub nation: Option<String>,
    #[serde(rename = "seasonStats")]
    pub season_stats: Option<SeasonStats>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SeasonStats {
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub minutes: u32,
    #[serde(rename = "xG", default)]
    pub expected_goals: f64,
}

impl From<TopScorer> for PlayerRow {
    fn from(scorer: TopScorer) -> Self {
        let stats = scorer.season_stats.unwrap_or_default();
        PlayerRow {
            name: scorer.name,
            nation: scorer.nation.unwrap_or_default(),
            goals: stats.goals,
            assists: stats.assists,
            minutes_played: stats.minutes,
            expected_goals: stats.expected_goals,
        }
    }
}

impl From<DashboardData> for ResultSet {
    fn from(data: DashboardData) -> Self {
        ResultSet {
            competitions_count: data.competitions.len(),
            seasons_count: data.seasons.len(),
            players: data.top_scorers.into_iter().map(PlayerRow::from).collect(),
        }
    }
}
