use crate::error::AppError;
use std::path::Path;

use super::Config;

/// Validates the configuration settings
///
/// # Validation Rules
/// - API endpoint cannot be empty and must be an http(s) URL with a host
/// - HTTP timeout and scorer limit must be positive
/// - Competition and season lists must be non-empty and free of duplicates
/// - Initial competition and season, when set, must be in those lists
/// - If log file path is provided, it cannot be empty
/// - Log file path parent directory must exist or be creatable
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    validate_endpoint(&config.api_endpoint)?;

    if config.http_timeout_seconds == 0 {
        return Err(AppError::config_error("HTTP timeout must be at least one second"));
    }
    if config.scorer_limit == 0 {
        return Err(AppError::config_error("Scorer limit must be at least 1"));
    }

    let catalog = config.catalog()?;
    if let Some(competition) = &config.initial_competition
        && catalog.find_competition(competition).is_none()
    {
        return Err(AppError::config_error(format!(
            "Initial competition '{competition}' is not in the competition list"
        )));
    }
    if let Some(season) = config.initial_season
        && !catalog.contains_season(season)
    {
        return Err(AppError::config_error(format!(
            "Initial season {season} is not in the season list"
        )));
    }

    if let Some(log_path) = &config.log_file_path {
        validate_log_path(log_path)?;
    }

    Ok(())
}

fn validate_endpoint(endpoint: &str) -> Result<(), AppError> {
    if endpoint.is_empty() {
        return Err(AppError::config_error("API endpoint cannot be empty"));
    }

    let Some(rest) = endpoint
        .strip_prefix("https://")
        .or_else(|| endpoint.strip_prefix("http://"))
    else {
        return Err(AppError::config_error(
            "API endpoint must start with http:// or https://",
        ));
    };

    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() {
        return Err(AppError::config_error("API endpoint must include a host"));
    }

    Ok(())
}

fn validate_log_path(log_path: &str) -> Result<(), AppError> {
    if log_path.is_empty() {
        return Err(AppError::config_error("Log file path cannot be empty"));
    }

    // Check if parent directory exists or can be created
    if let Some(parent) = Path::new(log_path).parent()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::config_error(format!(
                "Cannot create log directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::Competition;

    #[test]
    fn test_config_validation_valid_configs() {
        let valid_configs = vec![
            Config::default(),
            Config {
                api_endpoint: "https://scores.example.com/graphql".to_string(),
                ..Config::default()
            },
            Config {
                api_endpoint: "http://127.0.0.1:4000".to_string(),
                initial_competition: Some("esp".to_string()),
                initial_season: Some(2019),
                cache_ttl_seconds: Some(0),
                ..Config::default()
            },
        ];

        for config in valid_configs {
            assert!(
                validate_config(&config).is_ok(),
                "Config should be valid: {config:?}"
            );
        }
    }

    #[test]
    fn test_config_validation_invalid_configs() {
        let invalid_configs = vec![
            // Empty endpoint
            Config {
                api_endpoint: String::new(),
                ..Config::default()
            },
            // No scheme
            Config {
                api_endpoint: "scores.example.com/graphql".to_string(),
                ..Config::default()
            },
            // No host
            Config {
                api_endpoint: "https:///graphql".to_string(),
                ..Config::default()
            },
            Config {
                scorer_limit: 0,
                ..Config::default()
            },
            Config {
                http_timeout_seconds: 0,
                ..Config::default()
            },
            Config {
                seasons: Vec::new(),
                ..Config::default()
            },
            Config {
                seasons: vec![2024, 2024],
                ..Config::default()
            },
            Config {
                competitions: vec![
                    Competition::new("Serie A", "Italy", "ITA"),
                    Competition::new("Serie A", "Italy", "ITA"),
                ],
                ..Config::default()
            },
            Config {
                initial_competition: Some("MLS".to_string()),
                ..Config::default()
            },
            Config {
                initial_season: Some(2010),
                ..Config::default()
            },
            // Empty log file path
            Config {
                log_file_path: Some(String::new()),
                ..Config::default()
            },
        ];

        for config in invalid_configs {
            assert!(
                validate_config(&config).is_err(),
                "Config should be invalid: {config:?}"
            );
        }
    }

    #[test]
    fn test_log_path_parent_is_created() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("logs").join("app.log");
        let config = Config {
            log_file_path: Some(log_path.to_string_lossy().to_string()),
            ..Config::default()
        };
        assert!(validate_config(&config).is_ok());
        assert!(temp_dir.path().join("logs").exists());
    }
}
