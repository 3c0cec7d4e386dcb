//! Interactive UI module
//!
//! - `input_handler`: key to action mapping and application
//! - `refresh_manager`: adaptive poll timing
//! - `terminal_manager`: raw mode and alternate screen
//! - `core`: the main loop

mod core;
mod input_handler;
mod refresh_manager;
mod terminal_manager;

pub use core::*;
pub use input_handler::{Action, ActionOutcome, apply_action, map_key};
