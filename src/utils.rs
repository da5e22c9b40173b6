//! Formatting helpers for ffmpeg time arguments.

use crate::error::{CoreError, CoreResult};

/// Formats seconds as HH:MM:SS (e.g., 3725.0 -> "01:02:05"). Returns "??:??:??" for invalid inputs.
///
/// Components are truncated, never rounded, and the hours field grows past
/// two digits rather than wrapping at 24.
#[must_use]
pub fn format_time(seconds: f64) -> String {
    if seconds < 0.0 || !seconds.is_finite() {
        return "??:??:??".to_string();
    }

    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Rejects offsets that cannot become a valid ffmpeg time argument.
pub(crate) fn validate_offset(name: &str, seconds: f64) -> CoreResult<()> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(CoreError::InvalidInput(format!(
            "{name} must be a non-negative number of seconds, got {seconds}"
        )));
    }
    Ok(())
}
