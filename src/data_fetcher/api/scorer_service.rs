//! Scorer service client
//!
//! [`ScorerService`] is the seam between the result cache and the outside
//! world. [`GraphQlScorerService`] is the production implementation talking
//! to the dashboard's GraphQL endpoint.

use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::data_fetcher::models::{
    DashboardData, DashboardVariables, GraphQlRequest, GraphQlResponse, ResultSet,
};
use crate::error::AppError;
use crate::selection::QueryKey;

use super::fetch_utils::post_json;

/// Operation name of [`DASHBOARD_QUERY`]
pub const DASHBOARD_OPERATION: &str = "GetDashboardData";

/// Top scorers of one competition/season plus the catalog sizes
pub const DASHBOARD_QUERY: &str = r#"
query GetDashboardData($competition: String!, $seasonEndYear: Int!, $limit: Int!) {
  competitions
  seasons
  topScorers(seasonEndYear: $seasonEndYear, competition: $competition, limit: $limit) {
    name
    nation
    seasonStats(seasonEndYear: $seasonEndYear, competition: $competition) {
      goals
      assists
      minutes
      xG
    }
  }
}
"#;

/// Parameters of one upstream request, decoded from a [`QueryKey`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScorerRequest {
    pub competition: String,
    pub season_end_year: i32,
    pub limit: u32,
}

impl ScorerRequest {
    pub fn from_key(key: &QueryKey, limit: u32) -> Self {
        Self {
            competition: key.competition().to_string(),
            season_end_year: key.season_end_year(),
            limit,
        }
    }
}

/// Source of top scorer data.
pub trait ScorerService: Send + Sync + 'static {
    /// Fetches the ranked scorers for one competition and season.
    fn fetch_top_scorers(
        &self,
        request: &ScorerRequest,
    ) -> impl Future<Output = Result<ResultSet, AppError>> + Send;
}

fn build_client(timeout_seconds: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .pool_max_idle_per_host(crate::constants::HTTP_POOL_MAX_IDLE_PER_HOST)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// [`ScorerService`] backed by the GraphQL API
#[derive(Debug, Clone)]
pub struct GraphQlScorerService {
    client: Client,
    endpoint: String,
}

impl GraphQlScorerService {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Builds the service from configuration, with its own pooled HTTP client
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = build_client(config.http_timeout_seconds)?;
        Ok(Self::new(client, config.api_endpoint.clone()))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ScorerService for GraphQlScorerService {
    #[instrument(skip(self), fields(competition = %request.competition, season = request.season_end_year))]
    async fn fetch_top_scorers(&self, request: &ScorerRequest) -> Result<ResultSet, AppError> {
        let body = GraphQlRequest {
            query: DASHBOARD_QUERY,
            operation_name: DASHBOARD_OPERATION,
            variables: DashboardVariables {
                competition: request.competition.clone(),
                season_end_year: request.season_end_year,
                limit: request.limit,
            },
        };

        let response: GraphQlResponse<DashboardData> =
            post_json(&self.client, &self.endpoint, &body).await?;
        let results = into_result_set(response, &self.endpoint)?;

        info!(
            "Received {} scorers for {} {}",
            results.players.len(),
            request.competition,
            request.season_end_year
        );
        Ok(results)
    }
}

/// Unwraps a GraphQL envelope. Errors win over partial data.
fn into_result_set(
    response: GraphQlResponse<DashboardData>,
    endpoint: &str,
) -> Result<ResultSet, AppError> {
    if let Some(first) = response.errors.first() {
        if response.errors.len() > 1 {
            warn!(
                "Scorer service returned {} errors, showing the first",
                response.errors.len()
            );
        }
        return Err(AppError::api_graphql(first.message.clone()));
    }

    response
        .data
        .map(ResultSet::from)
        .ok_or_else(|| AppError::api_no_data("Response has no data field", endpoint))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{Selection, derive_key};

    fn parse(body: &str) -> GraphQlResponse<DashboardData> {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_request_decoded_from_key() {
        let key = derive_key(&Selection::new("La Liga", 2023));
        let request = ScorerRequest::from_key(&key, 10);
        assert_eq!(
            request,
            ScorerRequest {
                competition: "La Liga".to_string(),
                season_end_year: 2023,
                limit: 10,
            }
        );
    }

    #[test]
    fn test_query_declares_all_variables() {
        assert!(DASHBOARD_QUERY.contains(DASHBOARD_OPERATION));
        for variable in ["$competition", "$seasonEndYear", "$limit"] {
            assert!(DASHBOARD_QUERY.contains(variable), "missing {variable}");
        }
    }

    #[test]
    fn test_request_body_shape() {
        let body = GraphQlRequest {
            query: DASHBOARD_QUERY,
            operation_name: DASHBOARD_OPERATION,
            variables: DashboardVariables {
                competition: "Serie A".to_string(),
                season_end_year: 2022,
                limit: 10,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["operationName"], "GetDashboardData");
        assert_eq!(json["variables"]["seasonEndYear"], 2022);
        assert!(json["query"].as_str().unwrap().contains("topScorers"));
    }

    #[test]
    fn test_graphql_error_message_is_verbatim() {
        let response = parse(r#"{"data": null, "errors": [{"message": "service unavailable"}]}"#);
        let error = into_result_set(response, "http://localhost:4000/graphql").unwrap_err();
        assert_eq!(error.to_string(), "service unavailable");
    }

    #[test]
    fn test_missing_data_is_no_data_error() {
        let response = parse(r#"{}"#);
        let error = into_result_set(response, "http://localhost:4000/graphql").unwrap_err();
        assert!(matches!(error, AppError::ApiNoData { .. }));
    }

    #[test]
    fn test_empty_scorer_list_is_success() {
        let response = parse(r#"{"data": {"competitions": ["La Liga"], "seasons": [2019], "topScorers": []}}"#);
        let results = into_result_set(response, "http://localhost:4000/graphql").unwrap();
        assert!(results.is_empty());
        assert_eq!(results.competitions_count, 1);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_fetch_failure() {
        // Port 9 (discard) on localhost is not expected to run an HTTP server
        let service = GraphQlScorerService::new(
            build_client(crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS).unwrap(),
            "http://127.0.0.1:9/graphql",
        );
        let request = ScorerRequest {
            competition: "Premier League".to_string(),
            season_end_year: 2024,
            limit: 10,
        };
        let error = service.fetch_top_scorers(&request).await.unwrap_err();
        assert!(error.is_fetch_failure());
    }
}
