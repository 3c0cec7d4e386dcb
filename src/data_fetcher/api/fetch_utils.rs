//! Generic HTTP fetching utilities with error classification

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument};

use crate::data_fetcher::models::{GraphQlError, GraphQlResponse};
use crate::error::AppError;

/// Posts a JSON body and parses the JSON response.
///
/// Failures are terminal: there is no retry here, the caller decides whether
/// to ask again.
///
/// # Arguments
/// * `client` - HTTP client for making requests
/// * `url` - Endpoint to post to
/// * `body` - Request body, serialized as JSON
///
/// # Returns
/// * `Result<T, AppError>` - Parsed response data or a classified error
#[instrument(skip(client, body))]
pub(super) async fn post_json<B, T>(client: &Client, url: &str, body: &B) -> Result<T, AppError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    info!("Posting query to URL: {url}");

    let response = match client.post(url).json(body).send().await {
        Ok(response) => response,
        Err(e) => {
            error!("Request failed for URL {}: {}", url, e);
            return Err(if e.is_timeout() {
                AppError::network_timeout(url)
            } else if e.is_connect() {
                AppError::network_connection(url, e.to_string())
            } else {
                AppError::ApiFetch(e)
            });
        }
    };

    let status = response.status();
    debug!("Response status: {status}");

    let response_text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read response text from URL {}: {}", url, e);
            return Err(AppError::ApiFetch(e));
        }
    };

    debug!("Response length: {} bytes", response_text.len());
    let preview: String = response_text.chars().take(1024).collect();
    debug!("Response text (first 1024 chars): {preview}");

    if !status.is_success() {
        let status_code = status.as_u16();
        let reason = status.canonical_reason().unwrap_or("Unknown error");
        error!("HTTP {} - {} (URL: {})", status_code, reason, url);

        // GraphQL servers often put the useful message in the error body
        if let Some(message) = graphql_error_message(&response_text) {
            return Err(AppError::api_graphql(message));
        }
        return Err(classify_status(status_code, reason, url));
    }

    parse_body(&response_text, url)
}

/// Maps a non-success HTTP status to the matching error variant
pub(super) fn classify_status(status_code: u16, reason: &str, url: &str) -> AppError {
    match status_code {
        404 => AppError::api_not_found(url),
        429 => AppError::api_rate_limit(reason, url),
        400..=499 => AppError::api_client_error(status_code, reason, url),
        502 | 503 => AppError::api_service_unavailable(status_code, reason, url),
        _ => AppError::api_server_error(status_code, reason, url),
    }
}

/// Parses a response body, telling empty, non-JSON and mis-shaped bodies apart
pub(super) fn parse_body<T: DeserializeOwned>(response_text: &str, url: &str) -> Result<T, AppError> {
    match serde_json::from_str::<T>(response_text) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            error!("Failed to parse API response: {} (URL: {})", e, url);
            error!(
                "Response text (first 200 chars): {}",
                &response_text.chars().take(200).collect::<String>()
            );

            let trimmed = response_text.trim_start();
            if trimmed.is_empty() {
                Err(AppError::api_no_data("Response body is empty", url))
            } else if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
                Err(AppError::api_malformed_json(
                    "Response is not valid JSON",
                    url,
                ))
            } else {
                // Valid JSON but unexpected structure
                Err(AppError::api_unexpected_structure(e.to_string(), url))
            }
        }
    }
}

/// First GraphQL error message in a body, if the body is a GraphQL envelope
pub(super) fn graphql_error_message(response_text: &str) -> Option<String> {
    serde_json::from_str::<GraphQlResponse<serde_json::Value>>(response_text)
        .ok()
        .and_then(|response| response.errors.into_iter().next())
        .map(|GraphQlError { message }| message)
}
