// src/main.rs
mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Args, is_config_operation, is_noninteractive_mode};
use soccer_dashboard::config::Config;
use soccer_dashboard::data_fetcher::api::GraphQlScorerService;
use soccer_dashboard::error::AppError;
use soccer_dashboard::session::DashboardSession;
use soccer_dashboard::ui::run_interactive_ui;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // The guard must be kept alive for the duration of the program
    let (log_file_path, _guard) = logging::setup_logging(&args).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    if args.list_config {
        return commands::handle_list_config_command().await;
    }
    if is_config_operation(&args) {
        return commands::handle_config_update_command(&args).await;
    }

    // Load config first to fail early if there's an issue
    let config = Config::load().await?;
    let service = GraphQlScorerService::from_config(&config)?;
    let endpoint = service.endpoint().to_string();
    let mut session = DashboardSession::from_config(
        service,
        &config,
        args.competition.as_deref(),
        args.season,
    )?;

    if is_noninteractive_mode(&args) {
        commands::handle_once_command(&mut session, &endpoint, args.plain).await
    } else {
        run_interactive_ui(&mut session, &endpoint, args.debug).await
    }
}
