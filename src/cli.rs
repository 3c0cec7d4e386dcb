use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Determines if the application should run in non-interactive mode
/// Non-interactive mode is used when any of these conditions are met:
/// - --once flag is set (render once and exit)
/// - config operations are requested
/// - --debug mode is enabled (debug mode always renders once and exits)
pub fn is_noninteractive_mode(args: &Args) -> bool {
    args.once || is_config_operation(args) || args.debug
}

/// Whether the arguments only ask for configuration maintenance
pub fn is_config_operation(args: &Args) -> bool {
    args.new_api_endpoint.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
        || args.list_config
}

/// Top Scorers Teletext Dashboard
///
/// A teletext-style page listing the top goal scorers of the big European
/// football leagues, per competition and season.
///
/// In interactive mode (default):
/// - Use arrow keys (←/→) to switch competitions, or 1-9 to jump to one
/// - Press 's' to open the season list, ↑/↓ to move and Enter to select
/// - Press 'r' to retry or refresh the current page
/// - Press 'q' to quit
///
/// Results are cached for the session, so switching back to a competition or
/// season you already viewed does not ask the server again.
#[derive(Parser, Debug, Default)]
#[command(about, long_about = None, version)]
#[command(styles = get_styles())]
pub struct Args {
    /// Show the page once and exit immediately. Useful for scripts.
    /// The output stays visible in terminal history.
    #[arg(short, long)]
    pub once: bool,

    /// Competition to start on, by name or code (e.g. "La Liga" or ESP).
    #[arg(short = 'c', long = "competition", help_heading = "Selection")]
    pub competition: Option<String>,

    /// Season to start on, by end year (e.g. 2024 for 2023/2024).
    #[arg(short = 's', long = "season", help_heading = "Selection")]
    pub season: Option<i32>,

    /// Plain output without colours. Only affects --once.
    #[arg(long = "plain", short = 'p', help_heading = "Display Options")]
    pub plain: bool,

    /// Update API endpoint in config. Will prompt for new endpoint if not provided.
    #[arg(
        long = "config",
        help_heading = "Configuration",
        value_name = "API_ENDPOINT",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub new_api_endpoint: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Render once without clearing the terminal and log to stdout as well as the log file.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}
