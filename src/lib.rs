//! Top Scorers Teletext Dashboard Library
//!
//! This library provides a parameterized fetch/cache/render core for a
//! teletext-style page of football top scorers. A competition/season
//! selection is turned into a query key, results are fetched once per key
//! and cached for the session, and each change of the active key's cache
//! entry becomes a new view state for the renderer.
//!
//! # Examples
//!
//! ```rust,no_run
//! use soccer_dashboard::config::Config;
//! use soccer_dashboard::data_fetcher::api::GraphQlScorerService;
//! use soccer_dashboard::error::AppError;
//! use soccer_dashboard::session::DashboardSession;
//! use soccer_dashboard::teletext_ui::LeaderboardPage;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::default();
//!     let service = GraphQlScorerService::from_config(&config)?;
//!     let mut session = DashboardSession::from_config(service, &config, Some("La Liga"), Some(2023))?;
//!
//!     session.start();
//!     let view = session.settle().await.clone();
//!
//!     let page = LeaderboardPage::new(session.store(), &view, &config.api_endpoint);
//!     page.render_buffered(&mut std::io::stdout())?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod projection;
pub mod selection;
pub mod session;
pub mod teletext_ui;
pub mod testing_utils;
pub mod ui;
pub mod view_state;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::api::{GraphQlScorerService, ScorerService};
pub use data_fetcher::cache::{CacheEntry, CacheStats, EntryStatus, FetchOrchestrator, Freshness};
pub use data_fetcher::models::{PlayerRow, ResultSet};
pub use error::{AppError, ErrorInfo};
pub use projection::{DerivedStats, project};
pub use selection::{Catalog, ParameterStore, QueryKey, Selection, derive_key};
pub use session::DashboardSession;
pub use teletext_ui::LeaderboardPage;
pub use view_state::{ViewObserver, ViewState, ViewStateMachine};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
