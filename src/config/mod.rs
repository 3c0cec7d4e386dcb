use crate::constants::{self, env_vars};
use crate::data_fetcher::cache::Freshness;
use crate::error::AppError;
use crate::selection::{Catalog, Competition};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod user_prompts;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use user_prompts::prompt_for_api_endpoint;
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// GraphQL endpoint of the scorer service, including the scheme.
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for API requests. Defaults to 30 seconds if not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Number of top scorers requested per competition and season.
    #[serde(default = "default_scorer_limit")]
    pub scorer_limit: u32,
    /// Age after which a cached result is fetched again. Unset keeps results for the whole session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_ttl_seconds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_competition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_season: Option<i32>,
    /// Selectable season end years, most recent first.
    #[serde(default = "default_seasons")]
    pub seasons: Vec<i32>,
    /// Selectable competitions, in display order.
    #[serde(default = "default_competitions")]
    pub competitions: Vec<Competition>,
}

fn default_api_endpoint() -> String {
    constants::DEFAULT_API_ENDPOINT.to_string()
}

/// Default HTTP timeout in seconds
fn default_http_timeout() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

fn default_scorer_limit() -> u32 {
    constants::DEFAULT_SCORER_LIMIT
}

fn default_seasons() -> Vec<i32> {
    Catalog::builtin().seasons().to_vec()
}

fn default_competitions() -> Vec<Competition> {
    Catalog::builtin().competitions().to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_endpoint: default_api_endpoint(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
            scorer_limit: default_scorer_limit(),
            cache_ttl_seconds: None,
            initial_competition: None,
            initial_season: None,
            seasons: default_seasons(),
            competitions: default_competitions(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// If no config file exists, prompts user for the API endpoint and creates one.
    /// Environment variables can override config file values.
    ///
    /// # Environment Variables
    /// - `SOCCER_API_ENDPOINT` - Override API endpoint
    /// - `SOCCER_LOG_FILE` - Override log file path
    /// - `SOCCER_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    /// - `SOCCER_CACHE_TTL` - Expire cached results after this many seconds
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded or created configuration
    /// * `Err(AppError)` - Error occurred during load/create, or the result is invalid
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path).await?
        } else if std::env::var(env_vars::API_ENDPOINT).is_ok() {
            // Endpoint comes from the environment below, nothing to ask
            Config::default()
        } else {
            let mut config = Config::default();
            let input = prompt_for_api_endpoint(&config.api_endpoint).await?;
            if !input.is_empty() {
                config.api_endpoint = input;
            }
            config.save().await?;
            config
        };

        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// Unparseable numeric values are ignored.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(api_endpoint) = lookup(env_vars::API_ENDPOINT) {
            self.api_endpoint = api_endpoint;
        }

        if let Some(log_file_path) = lookup(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = lookup(env_vars::HTTP_TIMEOUT).and_then(|s| s.parse::<u64>().ok()) {
            self.http_timeout_seconds = timeout;
        }

        if let Some(ttl) = lookup(env_vars::CACHE_TTL).and_then(|s| s.parse::<u64>().ok()) {
            self.cache_ttl_seconds = Some(ttl);
        }
    }

    /// Validates the configuration settings
    ///
    /// # Returns
    /// * `Ok(())` - Configuration is valid
    /// * `Err(AppError)` - Configuration validation failed
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self)
    }

    /// Catalog of selectable competitions and seasons
    pub fn catalog(&self) -> Result<Catalog, AppError> {
        Catalog::new(self.competitions.clone(), self.seasons.clone())
    }

    /// Cache freshness policy derived from `cache_ttl_seconds`
    pub fn freshness(&self) -> Freshness {
        Freshness::from_ttl_seconds(self.cache_ttl_seconds)
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout.
    ///
    /// # Notes
    /// - Shows config file location and current settings
    /// - Handles case when no config file exists
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();

        if Path::new(&config_path).exists() {
            let config = Config::load().await?;
            println!("\nCurrent Configuration");
            println!("────────────────────────────────────");
            println!("Config Location:");
            println!("{config_path}");
            print!("{}", config.summary());
        } else {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
        }

        Ok(())
    }

    /// Human-readable listing of the settings, as printed by `display`
    pub fn summary(&self) -> String {
        const RULE: &str = "────────────────────────────────────";
        let mut out = String::new();
        let mut section = |title: &str, value: String| {
            out.push_str(RULE);
            out.push('\n');
            out.push_str(title);
            out.push_str(":\n");
            out.push_str(&value);
            out.push('\n');
        };

        section("API Endpoint", self.api_endpoint.clone());
        section(
            "HTTP Timeout",
            format!("{} seconds", self.http_timeout_seconds),
        );
        section("Scorer Limit", self.scorer_limit.to_string());
        section(
            "Cache Lifetime",
            match self.cache_ttl_seconds {
                Some(ttl) => format!("{ttl} seconds"),
                None => "Session".to_string(),
            },
        );
        section(
            "Competitions",
            self.competitions
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        );
        section(
            "Seasons",
            self.seasons
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        );
        section(
            "Log File Location",
            match &self.log_file_path {
                Some(custom_path) => custom_path.clone(),
                None => format!(
                    "{}/{}\n(Default location)",
                    get_log_dir_path(),
                    constants::LOG_FILE_NAME
                ),
            },
        );
        out
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }

        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path, without env overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
