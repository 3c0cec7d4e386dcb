pub mod graphql;
pub mod results;

pub use graphql::{
    DashboardData, DashboardVariables, GraphQlError, GraphQlRequest, GraphQlResponse,
    SeasonStats, TopScorer,
};
pub use results::{PlayerRow, ResultSet};
