use crate::cli::Args;
use crossterm::{execute, terminal::SetTitle};
use soccer_dashboard::config::Config;
use soccer_dashboard::config::user_prompts::prompt_for_api_endpoint;
use soccer_dashboard::constants::ui::PAGE_NUMBER;
use soccer_dashboard::data_fetcher::api::ScorerService;
use soccer_dashboard::error::AppError;
use soccer_dashboard::session::DashboardSession;
use soccer_dashboard::teletext_ui::LeaderboardPage;
use std::io::stdout;
use tracing::info;

fn set_title() -> Result<(), AppError> {
    execute!(stdout(), SetTitle(format!("TOP SCORERS {PAGE_NUMBER}")))?;
    Ok(())
}

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    set_title()?;
    Config::display().await
}

/// Handles configuration update commands (--config, --set-log-file, --clear-log-file).
///
/// Starts from the saved file when there is one, without prompting, and
/// validates the result before saving.
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    let mut config = Config::load_from_path(&Config::get_config_path())
        .await
        .unwrap_or_default();

    if let Some(new_endpoint) = &args.new_api_endpoint {
        config.api_endpoint = if new_endpoint.is_empty() {
            let input = prompt_for_api_endpoint(&config.api_endpoint).await?;
            if input.is_empty() {
                config.api_endpoint.clone()
            } else {
                input
            }
        } else {
            new_endpoint.clone()
        };
    }

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.validate()?;
    config.save().await?;
    info!("Config saved to {}", Config::get_config_path());
    println!("Config updated successfully!");

    Ok(())
}

/// Handles the --once command (quick view mode).
///
/// Resolves the selection, waits for the fetch to settle and prints the page
/// inline. A failed fetch is shown on the page, it is not an error exit.
pub async fn handle_once_command<S: ScorerService>(
    session: &mut DashboardSession<S>,
    endpoint: &str,
    plain: bool,
) -> Result<(), AppError> {
    session.start();
    let view = session.settle().await.clone();
    info!("Quick view resolved to {} for {}", view.label(), view.key());

    if !plain {
        set_title()?;
    }
    LeaderboardPage::new(session.store(), &view, endpoint)
        .with_plain(plain)
        .render_buffered(&mut stdout())?;
    println!();
    Ok(())
}
