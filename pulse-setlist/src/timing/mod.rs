//! Round timeline and track coverage math
//!
//! All functions here are pure: the same configuration always yields the
//! same timeline, down to the millisecond.

pub mod calculator;
pub mod coverage;
pub mod intervals;
pub mod trigger;

use serde::Serialize;

pub use calculator::RoundTimingCalculator;
pub use coverage::TrackCoverage;
pub use intervals::RoundIntervals;
pub use trigger::{SecondTrackTrigger, TriggerType};

/// Fixed lead-in before each round's work begins (5, 4, 3, 2, 1, GO!)
pub const COUNTDOWN_MS: u64 = 6000;

/// Computed boundaries of one round on the session timeline
///
/// `work_start_ms - countdown_start_ms` is always [`COUNTDOWN_MS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundTiming {
    /// Logical round number (1-based); repeats within the base cycle
    pub round_number: u32,
    /// Position within the session (0-based); never repeats
    pub round_index: u32,
    /// True for rounds in the second pass of a repeated cycle
    pub is_repeat: bool,
    pub countdown_start_ms: u64,
    pub work_start_ms: u64,
    /// End of the last exercise, before any rest between rounds
    pub end_time_ms: u64,
    /// Countdown plus all exercise and intra-round rest time
    pub total_duration_ms: u64,
    pub exercise_count: u32,
}

/// Whole-session timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CircuitTimingResult {
    pub rounds: Vec<RoundTiming>,
    pub total_workout_duration_ms: u64,
    pub total_work_time_ms: u64,
    /// Intra-round rest plus rest between rounds
    pub total_rest_time_ms: u64,
}
