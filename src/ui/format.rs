/// Shown for zero, negative or non-finite durations
pub const FALLBACK_DURATION: &str = "00:00";

/// Format seconds as `MM:SS`, or `H:MM:SS` from one hour up.
pub fn humanize_video_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return FALLBACK_DURATION.to_owned();
    }

    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}
