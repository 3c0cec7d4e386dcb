//! Poll timing for the interactive loop

use crate::constants::polling::{
    ACTIVE_MS, IDLE_MS, IDLE_THRESHOLD_SECONDS, SEMI_ACTIVE_MS, SEMI_ACTIVE_THRESHOLD_SECONDS,
};
use std::time::Duration;

/// Calculate adaptive polling interval based on user activity.
/// A pending fetch keeps the loop at the active rate so its result shows up promptly.
pub(super) fn calculate_poll_interval(time_since_activity: Duration, loading: bool) -> Duration {
    if loading || time_since_activity < Duration::from_secs(SEMI_ACTIVE_THRESHOLD_SECONDS) {
        Duration::from_millis(ACTIVE_MS) // Active: smooth interaction
    } else if time_since_activity < Duration::from_secs(IDLE_THRESHOLD_SECONDS) {
        Duration::from_millis(SEMI_ACTIVE_MS) // Semi-active: good responsiveness
    } else {
        Duration::from_millis(IDLE_MS) // Idle: conserve CPU
    }
}
