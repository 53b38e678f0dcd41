//! Second-track trigger resolution
//!
//! When the hype track covers the whole round, the second track starts
//! naturally at round end, into the rest between rounds. When it falls
//! short, the second track is cued at the start of the final exercise so
//! the change lands on a phase boundary instead of wherever the first
//! track happens to run out.

use super::{RoundIntervals, RoundTiming, TrackCoverage};
use crate::error::Result;
use pulse_common::human_time::format_timeline_ms;
use pulse_common::{RoundTemplateConfig, TrackUsage};
use serde::Serialize;
use tracing::debug;

/// Intent of the second track's start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerType {
    /// Mid-round swap during the final exercise
    Bridge,
    /// Natural swap at round end
    Rest,
}

impl TriggerType {
    /// Pool the second track is drawn from
    pub fn usage(&self) -> TrackUsage {
        match self {
            TriggerType::Bridge => TrackUsage::Bridge,
            TriggerType::Rest => TrackUsage::Rest,
        }
    }
}

/// When and why the second track starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SecondTrackTrigger {
    pub trigger_time_ms: u64,
    pub trigger_type: TriggerType,
}

/// Resolve the second track's trigger for one round
///
/// `round_number` is the logical round number used to find the round's
/// template; under `repeat_rounds` it differs from the session position.
///
/// # Errors
/// `Configuration` only on the bridge path, when the round's intervals
/// cannot be resolved.
pub fn resolve(
    coverage: &TrackCoverage,
    round: &RoundTiming,
    config: &RoundTemplateConfig,
    round_number: u32,
) -> Result<SecondTrackTrigger> {
    if coverage.covers_full_round {
        debug!(round_number, "Track covers full round, rest track at round end");
        return Ok(SecondTrackTrigger {
            trigger_time_ms: round.end_time_ms,
            trigger_type: TriggerType::Rest,
        });
    }

    let intervals = RoundIntervals::resolve(config, round_number)?;
    let last_exercise_start_ms = round.work_start_ms + intervals.last_exercise_offset_ms();

    debug!(
        round_number,
        last_exercise_start = %format_timeline_ms(last_exercise_start_ms),
        track_ends = %format_timeline_ms(coverage.coverage_end_ms),
        "Track needs bridge"
    );

    Ok(SecondTrackTrigger {
        trigger_time_ms: last_exercise_start_ms,
        trigger_type: TriggerType::Bridge,
    })
}
