// src/teletext_ui/mod.rs - Teletext-style rendering of the scorer page

pub mod colors;
pub mod formatting;
pub mod loading_indicator;
pub mod page;

pub use formatting::{format_expected_goals, format_minutes, season_label};
pub use loading_indicator::LoadingIndicator;
pub use page::LeaderboardPage;
