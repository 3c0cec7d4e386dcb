//! Application-wide constants and configuration values
//!
//! This module centralizes all magic numbers and default configuration values
//! so the config layer, the fetch path and the renderer agree on them.

/// Default GraphQL endpoint of the scorer service
pub const DEFAULT_API_ENDPOINT: &str = "http://localhost:4000/graphql";

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Number of players requested from the scorer service
pub const DEFAULT_SCORER_LIMIT: u32 = 10;

/// Name of the config/log directory under the platform config dir
pub const APP_DIR_NAME: &str = "soccer_dashboard";

/// Default log file name
pub const LOG_FILE_NAME: &str = "soccer_dashboard.log";

/// Result cache tuning
pub mod cache {
    /// Maximum number of settled entries kept per session
    pub const MAX_ENTRIES: usize = 64;
}

/// Built-in competition catalog used when the config file does not list one
pub mod catalog {
    /// (name, country, short code)
    pub const COMPETITIONS: [(&str, &str, &str); 5] = [
        ("Premier League", "England", "ENG"),
        ("La Liga", "Spain", "ESP"),
        ("Bundesliga", "Germany", "GER"),
        ("Serie A", "Italy", "ITA"),
        ("Ligue 1", "France", "FRA"),
    ];

    /// Selectable season end years, most recent first
    pub const SEASONS: [i32; 7] = [2024, 2023, 2022, 2021, 2020, 2019, 2018];
}

/// UI polling intervals in milliseconds
pub mod polling {
    /// Polling interval for active use (< 5 seconds idle)
    pub const ACTIVE_MS: u64 = 50;

    /// Polling interval for semi-active use (5-30 seconds idle)
    pub const SEMI_ACTIVE_MS: u64 = 200;

    /// Polling interval for idle use (> 30 seconds idle)
    pub const IDLE_MS: u64 = 500;

    /// Threshold for considering user as idle (seconds)
    pub const IDLE_THRESHOLD_SECONDS: u64 = 30;

    /// Threshold for considering user as semi-active (seconds)
    pub const SEMI_ACTIVE_THRESHOLD_SECONDS: u64 = 5;
}

/// UI layout constants
pub mod ui {
    /// Teletext page number shown in the header
    pub const PAGE_NUMBER: u16 = 235;

    /// Width used when rendering outside the alternate screen
    pub const DEFAULT_WIDTH: usize = 80;

    /// Content margin from terminal border
    pub const CONTENT_MARGIN: usize = 2;

    /// Column width of the player name in the leaderboard table
    pub const PLAYER_COLUMN_WIDTH: usize = 24;
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for API endpoint override
    pub const API_ENDPOINT: &str = "SOCCER_API_ENDPOINT";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "SOCCER_LOG_FILE";

    /// Environment variable for HTTP timeout override in seconds
    pub const HTTP_TIMEOUT: &str = "SOCCER_HTTP_TIMEOUT";

    /// Environment variable for result cache TTL override in seconds
    pub const CACHE_TTL: &str = "SOCCER_CACHE_TTL";
}
