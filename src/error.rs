use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch data from API: {0}")]
    ApiFetch(#[from] reqwest::Error),

    #[error("Failed to parse API response: {0}")]
    ApiParse(#[from] serde_json::Error),

    // Specific HTTP status code errors
    #[error("API request not found (404): {url}")]
    ApiNotFound { url: String },

    #[error("API server error ({status}): {message} (URL: {url})")]
    ApiServerError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API client error ({status}): {message} (URL: {url})")]
    ApiClientError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API rate limit exceeded (429): {message} (URL: {url})")]
    ApiRateLimit { message: String, url: String },

    #[error("API service unavailable ({status}): {message} (URL: {url})")]
    ApiServiceUnavailable {
        status: u16,
        message: String,
        url: String,
    },

    // Network-specific errors
    #[error("Network timeout while fetching data from: {url}")]
    NetworkTimeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    // Data parsing and validation errors
    #[error("API returned malformed JSON: {message} (URL: {url})")]
    ApiMalformedJson { message: String, url: String },

    #[error("API returned unexpected data structure: {message} (URL: {url})")]
    ApiUnexpectedStructure { message: String, url: String },

    #[error("API returned empty or missing data: {message} (URL: {url})")]
    ApiNoData { message: String, url: String },

    /// Error reported by the query service itself. The message is shown as-is.
    #[error("{message}")]
    ApiGraphQl { message: String },

    /// A selection value outside the configured catalog. The selection is left untouched.
    #[error("Invalid {parameter}: {value}")]
    InvalidParameter {
        parameter: &'static str,
        value: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create an error for a rejected competition or season value
    pub fn invalid_parameter(parameter: &'static str, value: impl fmt::Display) -> Self {
        Self::InvalidParameter {
            parameter,
            value: value.to_string(),
        }
    }

    /// Create an error carrying a message from the query service
    pub fn api_graphql(message: impl Into<String>) -> Self {
        Self::ApiGraphQl {
            message: message.into(),
        }
    }

    /// Create an API not found error
    pub fn api_not_found(url: impl Into<String>) -> Self {
        Self::ApiNotFound { url: url.into() }
    }

    /// Create an API server error (5xx status codes)
    pub fn api_server_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiServerError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API client error (4xx status codes except 404 and 429)
    pub fn api_client_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiClientError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API rate limit error
    pub fn api_rate_limit(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiRateLimit {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API service unavailable error
    pub fn api_service_unavailable(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiServiceUnavailable {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a network timeout error
    pub fn network_timeout(url: impl Into<String>) -> Self {
        Self::NetworkTimeout { url: url.into() }
    }

    /// Create a network connection error
    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a malformed JSON error
    pub fn api_malformed_json(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiMalformedJson {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an unexpected data structure error
    pub fn api_unexpected_structure(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiUnexpectedStructure {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a no data error
    pub fn api_no_data(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiNoData {
            message: message.into(),
            url: url.into(),
        }
    }

    /// True for failures of the upstream fetch (transport, HTTP status, payload)
    pub fn is_fetch_failure(&self) -> bool {
        !matches!(
            self,
            AppError::InvalidParameter { .. }
                | AppError::Io(_)
                | AppError::TomlSerialize(_)
                | AppError::TomlDeserialize(_)
                | AppError::Config(_)
                | AppError::LogSetup(_)
        )
    }
}

/// Cloneable, user-facing description of a failed fetch.
///
/// Stored in failed cache entries and handed to every waiter of the request,
/// which is why it holds only the rendered message and not the source error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    message: String,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&AppError> for ErrorInfo {
    fn from(error: &AppError) -> Self {
        ErrorInfo::new(error.to_string())
    }
}

impl From<AppError> for ErrorInfo {
    fn from(error: AppError) -> Self {
        ErrorInfo::from(&error)
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_helper() {
        let error = AppError::config_error("Invalid configuration");
        assert!(matches!(error, AppError::Config(_)));
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid configuration"
        );
    }

    #[test]
    fn test_log_setup_error_helper() {
        let error = AppError::log_setup_error("Failed to initialize logger");
        assert!(matches!(error, AppError::LogSetup(_)));
        assert_eq!(
            error.to_string(),
            "Log setup error: Failed to initialize logger"
        );
    }

    #[test]
    fn test_invalid_parameter_helper() {
        let error = AppError::invalid_parameter("competition", "Eredivisie");
        assert!(matches!(error, AppError::InvalidParameter { .. }));
        assert_eq!(error.to_string(), "Invalid competition: Eredivisie");

        let error = AppError::invalid_parameter("season", 1999);
        assert_eq!(error.to_string(), "Invalid season: 1999");
    }

    #[test]
    fn test_graphql_error_is_passed_through_verbatim() {
        let error = AppError::api_graphql("service unavailable");
        assert_eq!(error.to_string(), "service unavailable");
        assert_eq!(ErrorInfo::from(&error).message(), "service unavailable");
    }

    #[test]
    fn test_api_not_found_helper() {
        let error = AppError::api_not_found("http://localhost:4000/graphql");
        assert!(matches!(error, AppError::ApiNotFound { .. }));
        assert_eq!(
            error.to_string(),
            "API request not found (404): http://localhost:4000/graphql"
        );
    }

    #[test]
    fn test_api_server_error_helper() {
        let error =
            AppError::api_server_error(500, "Internal server error", "https://api.example.com");
        assert!(matches!(error, AppError::ApiServerError { .. }));
        assert_eq!(
            error.to_string(),
            "API server error (500): Internal server error (URL: https://api.example.com)"
        );
    }

    #[test]
    fn test_api_client_error_helper() {
        let error = AppError::api_client_error(400, "Bad request", "https://api.example.com");
        assert!(matches!(error, AppError::ApiClientError { .. }));
        assert_eq!(
            error.to_string(),
            "API client error (400): Bad request (URL: https://api.example.com)"
        );
    }

    #[test]
    fn test_api_rate_limit_helper() {
        let error = AppError::api_rate_limit("Too many requests", "https://api.example.com");
        assert!(matches!(error, AppError::ApiRateLimit { .. }));
        assert_eq!(
            error.to_string(),
            "API rate limit exceeded (429): Too many requests (URL: https://api.example.com)"
        );
    }

    #[test]
    fn test_api_service_unavailable_helper() {
        let error = AppError::api_service_unavailable(
            503,
            "Service unavailable",
            "https://api.example.com",
        );
        assert!(matches!(error, AppError::ApiServiceUnavailable { .. }));
        assert_eq!(
            error.to_string(),
            "API service unavailable (503): Service unavailable (URL: https://api.example.com)"
        );
    }

    #[test]
    fn test_network_errors() {
        let error = AppError::network_timeout("https://api.example.com");
        assert_eq!(
            error.to_string(),
            "Network timeout while fetching data from: https://api.example.com"
        );

        let error = AppError::network_connection("https://api.example.com", "Connection refused");
        assert_eq!(
            error.to_string(),
            "Connection failed to: https://api.example.com - Connection refused"
        );
    }

    #[test]
    fn test_payload_errors() {
        let error =
            AppError::api_malformed_json("Response is not valid JSON", "https://api.example.com");
        assert_eq!(
            error.to_string(),
            "API returned malformed JSON: Response is not valid JSON (URL: https://api.example.com)"
        );

        let error =
            AppError::api_unexpected_structure("Missing required field", "https://api.example.com");
        assert_eq!(
            error.to_string(),
            "API returned unexpected data structure: Missing required field (URL: https://api.example.com)"
        );

        let error = AppError::api_no_data("Response body is empty", "https://api.example.com");
        assert_eq!(
            error.to_string(),
            "API returned empty or missing data: Response body is empty (URL: https://api.example.com)"
        );
    }

    #[test]
    fn test_is_fetch_failure() {
        assert!(AppError::network_timeout("url").is_fetch_failure());
        assert!(AppError::api_graphql("boom").is_fetch_failure());
        assert!(AppError::api_server_error(500, "message", "url").is_fetch_failure());
        assert!(AppError::api_no_data("message", "url").is_fetch_failure());

        assert!(!AppError::invalid_parameter("season", 1800).is_fetch_failure());
        assert!(!AppError::config_error("message").is_fetch_failure());
        assert!(!AppError::log_setup_error("message").is_fetch_failure());
    }

    #[test]
    fn test_error_info_uses_display_text() {
        let info = ErrorInfo::from(AppError::network_connection(
            "http://localhost:4000/graphql",
            "Connection refused",
        ));
        assert_eq!(
            info.message(),
            "Connection failed to: http://localhost:4000/graphql - Connection refused"
        );
        assert_eq!(info.to_string(), info.message());
    }

    #[test]
    fn test_error_from_reqwest() {
        let client = reqwest::Client::new();
        let request_result = client.get("not a valid url").build();

        match request_result {
            Err(reqwest_error) => {
                let app_error: AppError = reqwest_error.into();
                assert!(matches!(app_error, AppError::ApiFetch(_)));
            }
            Ok(_) => panic!("Expected an error from invalid URL"),
        }
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let app_error: AppError = json_error.into();
        assert!(matches!(app_error, AppError::ApiParse(_)));
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let app_error: AppError = io_error.into();
        assert!(matches!(app_error, AppError::Io(_)));
    }

    #[test]
    fn test_error_from_toml_deserialize() {
        let invalid_toml = "invalid = [toml";
        let toml_error = toml::from_str::<serde_json::Value>(invalid_toml).unwrap_err();
        let app_error: AppError = toml_error.into();
        assert!(matches!(app_error, AppError::TomlDeserialize(_)));
    }
}
