pub mod api;
pub mod cache;
pub mod models;

pub use api::{GraphQlScorerService, ScorerRequest, ScorerService};
pub use cache::{CacheEntry, EntryStatus, FetchOrchestrator, Freshness};
pub use models::{PlayerRow, ResultSet};
