//! Human-readable timeline formatting
//!
//! Provides consistent display of workout timeline positions and durations
//! across summaries, CLI output and log lines.

/// Timeline positions at or beyond this many seconds switch to `H:MM:SS`
const HOUR_FORMAT_MIN: u64 = 3600;

/// Format a timeline offset in milliseconds as a clock value.
///
/// - Below one hour: `M:SS`
/// - One hour and beyond: `H:MM:SS`
///
/// Sub-second remainders are truncated, matching how a countdown display
/// shows elapsed workout time.
///
/// # Examples
///
/// ```
/// use pulse_common::human_time::format_timeline_ms;
///
/// assert_eq!(format_timeline_ms(0), "0:00");
/// assert_eq!(format_timeline_ms(246_000), "4:06");
/// assert_eq!(format_timeline_ms(3_725_000), "1:02:05");
/// ```
pub fn format_timeline_ms(ms: u64) -> String {
    let total_seconds = ms / 1000;

    if total_seconds < HOUR_FORMAT_MIN {
        let minutes = total_seconds / 60;
        let secs = total_seconds % 60;
        format!("{}:{:02}", minutes, secs)
    } else {
        let hours = total_seconds / 3600;
        let mins = (total_seconds % 3600) / 60;
        let secs = total_seconds % 60;
        format!("{}:{:02}:{:02}", hours, mins, secs)
    }
}

/// Format a duration in milliseconds as seconds with one decimal place.
///
/// Used for short quantities such as coverage shortfalls, where the
/// clock format would hide sub-second differences.
///
/// ```
/// use pulse_common::human_time::format_seconds_ms;
///
/// assert_eq!(format_seconds_ms(91_000), "91.0s");
/// assert_eq!(format_seconds_ms(1_250), "1.2s");
/// ```
pub fn format_seconds_ms(ms: u64) -> String {
    // Truncate to tenths so 1.25s reads as 1.2s rather than depending on float rounding
    let tenths = ms / 100;
    format!("{}.{}s", tenths / 10, tenths % 10)
}
