pub mod fetch_utils;
pub mod scorer_service;

// Re-export the scorer service seam
pub use scorer_service::{
    DASHBOARD_OPERATION, DASHBOARD_QUERY, GraphQlScorerService, ScorerRequest, ScorerService,
};
