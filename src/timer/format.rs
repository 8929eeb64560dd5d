// timer/format.rs - Countdown Display Text

use crate::constants::timer::{EXPIRED_TEXT, HOUR_DISPLAY_THRESHOLD};

use super::engine::Phase;

/// Format remaining seconds as `hh:mm:ss` from one hour up, else `mm:ss`
pub fn format_remaining(remaining_seconds: u64) -> String {
    let hours = remaining_seconds / 3600;
    let minutes = (remaining_seconds % 3600) / 60;
    let seconds = remaining_seconds % 60;

    if remaining_seconds >= HOUR_DISPLAY_THRESHOLD {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Text the overlay shows for a given phase and remaining time
pub fn display_text(phase: Phase, remaining_seconds: u64) -> String {
    match phase {
        Phase::Expired => EXPIRED_TEXT.to_string(),
        _ => format_remaining(remaining_seconds),
    }
}
