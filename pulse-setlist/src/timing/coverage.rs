//! Track coverage evaluation
//!
//! Playback of a hype track starts [`HYPE_LEAD_IN_SEC`] seconds before its
//! tagged hype moment. Everything earlier in the track is skipped, so it is
//! subtracted from the playable budget.

use super::RoundTiming;
use pulse_common::human_time::format_seconds_ms;
use serde::Serialize;
use tracing::debug;

/// Seconds of a track played before its hype moment
pub const HYPE_LEAD_IN_SEC: f64 = 5.0;

/// How far a track carries into a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackCoverage {
    pub track_id: String,
    /// Timeline position where the track starts (the round's countdown)
    pub start_time_ms: u64,
    /// Where the track would end if played from its natural start
    pub natural_end_time_ms: u64,
    /// Playable duration after skipping the pre-hype lead-in
    pub effective_duration_ms: u64,
    pub covers_full_round: bool,
    /// Where the track's audio runs out, clamped to the round end
    pub coverage_end_ms: u64,
    /// Round time left uncovered; zero on full coverage
    pub shortfall_ms: u64,
}

/// Playable duration of a track given its optional hype offset
///
/// `duration - max(0, offset - 5s)`: no offset, or an offset of 5 seconds
/// or less, leaves the duration unchanged. Never underflows.
pub fn effective_duration_ms(track_duration_ms: u64, hype_offset_sec: Option<f64>) -> u64 {
    let skipped_ms = hype_offset_sec
        .map(|offset| ((offset - HYPE_LEAD_IN_SEC).max(0.0) * 1000.0).round() as u64)
        .unwrap_or(0);

    track_duration_ms.saturating_sub(skipped_ms)
}

/// Evaluate whether a track started at the round's countdown covers the round
pub fn evaluate(
    track_id: &str,
    track_duration_ms: u64,
    hype_offset_sec: Option<f64>,
    round: &RoundTiming,
) -> TrackCoverage {
    let effective = effective_duration_ms(track_duration_ms, hype_offset_sec);
    let covers_full_round = effective >= round.total_duration_ms;
    let shortfall_ms = round.total_duration_ms.saturating_sub(effective);

    let coverage = TrackCoverage {
        track_id: track_id.to_string(),
        start_time_ms: round.countdown_start_ms,
        natural_end_time_ms: round.countdown_start_ms.saturating_add(track_duration_ms),
        effective_duration_ms: effective,
        covers_full_round,
        coverage_end_ms: round
            .countdown_start_ms
            .saturating_add(effective)
            .min(round.end_time_ms),
        shortfall_ms,
    };

    debug!(
        round_number = round.round_number,
        track_id,
        effective_duration_ms = effective,
        round_duration_ms = round.total_duration_ms,
        covers_full_round,
        shortfall = %format_seconds_ms(shortfall_ms),
        "Track coverage"
    );

    coverage
}
