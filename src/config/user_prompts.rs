//! Prompts used when no configuration file exists yet

use crate::error::AppError;
use std::io::Write;
use tokio::io::{self, AsyncBufReadExt};

/// Asks for the scorer service endpoint and returns the trimmed input.
///
/// An empty answer means "keep `default`"; the caller decides what that is.
pub async fn prompt_for_api_endpoint(default: &str) -> Result<String, AppError> {
    print!("Please enter the scorer API endpoint [{default}]: ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin);
    reader.read_line(&mut input).await?;
    Ok(input.trim().to_string())
}
