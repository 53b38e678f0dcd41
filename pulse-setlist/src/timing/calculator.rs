//! Round timing calculator
//!
//! Lays out every round of a session on one timeline:
//!
//! ```text
//! |countdown|ex1|rest|ex2|...|exN| rest between rounds |countdown|ex1|...
//! ^          ^                  ^                      ^
//! countdown  work_start         end_time               next countdown
//! ```
//!
//! No rest is added after the final round. The `total_rounds` argument
//! already includes the doubling from `repeat_rounds`; the calculator maps
//! each session position back to its logical round number.

use super::{CircuitTimingResult, RoundIntervals, RoundTiming, COUNTDOWN_MS};
use crate::error::{Result, SetlistError};
use pulse_common::human_time::format_timeline_ms;
use pulse_common::time::secs_to_ms;
use pulse_common::RoundTemplateConfig;
use tracing::debug;

/// Computes the session timeline from round templates
pub struct RoundTimingCalculator;

impl RoundTimingCalculator {
    /// Calculate timing for all rounds in a session
    ///
    /// # Errors
    /// `Configuration` for a missing template, a borrowing variant without a
    /// `circuit_round` template, a round with no exercises, a timeline that
    /// overflows, or a `total_rounds` other than twice the template count
    /// when `repeat_rounds` is set. Errors are fatal for the whole calculation.
    pub fn calculate(
        config: &RoundTemplateConfig,
        total_rounds: u32,
    ) -> Result<CircuitTimingResult> {
        if config.repeat_rounds && total_rounds != 0 {
            let cycle = config.effective_round_count();
            if total_rounds != cycle {
                return Err(SetlistError::Configuration(format!(
                    "repeat_rounds with {} templates requires {} rounds, got {}",
                    config.round_templates.len(),
                    cycle,
                    total_rounds
                )));
            }
        }

        let base_rounds = if config.repeat_rounds {
            total_rounds / 2
        } else {
            total_rounds
        };
        let rest_between_rounds_ms = secs_to_ms(config.rest_between_rounds_seconds);

        debug!(
            total_rounds,
            base_rounds,
            repeat_rounds = config.repeat_rounds,
            rest_between_rounds_ms,
            "Starting circuit timing calculation"
        );

        let mut rounds = Vec::with_capacity(total_rounds as usize);
        let mut current_time_ms: u64 = 0;
        let mut total_work_time_ms: u64 = 0;
        let mut total_rest_time_ms: u64 = 0;

        for index in 0..total_rounds {
            let round_number = (index % base_rounds) + 1;
            let intervals = RoundIntervals::resolve(config, round_number)?;

            let countdown_start_ms = current_time_ms;
            let exercise_duration_ms = intervals.exercise_duration_ms();
            let total_duration_ms = COUNTDOWN_MS
                .checked_add(exercise_duration_ms)
                .ok_or_else(|| duration_overflow(round_number))?;
            let work_start_ms = countdown_start_ms
                .checked_add(COUNTDOWN_MS)
                .ok_or_else(|| duration_overflow(round_number))?;
            let end_time_ms = countdown_start_ms
                .checked_add(total_duration_ms)
                .ok_or_else(|| duration_overflow(round_number))?;

            let timing = RoundTiming {
                round_number,
                round_index: index,
                is_repeat: config.repeat_rounds && index >= base_rounds,
                countdown_start_ms,
                work_start_ms,
                end_time_ms,
                total_duration_ms,
                exercise_count: intervals.exercises,
            };

            debug!(
                round_number,
                round_index = index,
                is_repeat = timing.is_repeat,
                start = %format_timeline_ms(countdown_start_ms),
                work_start = %format_timeline_ms(work_start_ms),
                end = %format_timeline_ms(end_time_ms),
                exercise_duration_ms,
                "Round timing"
            );

            rounds.push(timing);

            total_work_time_ms += intervals.work_total_ms();
            total_rest_time_ms += intervals.rest_total_ms();

            // Rest between rounds, except after the last round
            current_time_ms = end_time_ms;
            if index + 1 < total_rounds {
                current_time_ms = current_time_ms
                    .checked_add(rest_between_rounds_ms)
                    .ok_or_else(|| duration_overflow(round_number))?;
                total_rest_time_ms += rest_between_rounds_ms;
            }
        }

        Ok(CircuitTimingResult {
            rounds,
            total_workout_duration_ms: current_time_ms,
            total_work_time_ms,
            total_rest_time_ms,
        })
    }
}

fn duration_overflow(round_number: u32) -> SetlistError {
    SetlistError::Configuration(format!("round {} duration overflows", round_number))
}
