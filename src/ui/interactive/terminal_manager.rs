//! Terminal setup and cleanup for interactive mode

use crate::error::AppError;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use std::io::{Stdout, stdout};

/// Terminal manager responsible for setup and cleanup operations.
/// In debug mode the terminal is left as is so log output stays readable.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalManager {
    debug_mode: bool,
}

impl TerminalManager {
    pub fn new(debug_mode: bool) -> Self {
        Self { debug_mode }
    }

    /// Enables raw mode and enters the alternate screen
    pub fn setup_terminal(&self) -> Result<Stdout, AppError> {
        let mut stdout = stdout();

        if !self.debug_mode {
            enable_raw_mode()?;
            execute!(stdout, EnterAlternateScreen)?;
        }

        Ok(stdout)
    }

    /// Restores terminal to its original state
    pub fn cleanup_terminal(&self, mut stdout: Stdout) -> Result<(), AppError> {
        if !self.debug_mode {
            disable_raw_mode()?;
            execute!(stdout, LeaveAlternateScreen)?;
        }
        Ok(())
    }
}
