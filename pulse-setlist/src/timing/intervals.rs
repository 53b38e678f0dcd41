//! Work/rest interval resolution per round
//!
//! `circuit_round` and `warmup_cooldown_round` carry their own intervals.
//! `stations_round` borrows both work and rest from the session's
//! `circuit_round` template; `amrap_round` borrows only the work interval
//! and runs its exercises back to back.

use crate::error::{Result, SetlistError};
use pulse_common::time::secs_to_ms;
use pulse_common::{RoundTemplateConfig, RoundVariant};

/// Resolved interval timing for one round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundIntervals {
    pub work_ms: u64,
    /// Rest between consecutive exercises; zero for continuous rounds
    pub rest_ms: u64,
    pub exercises: u32,
    /// AMRAP: no rest between exercises
    pub continuous: bool,
}

impl RoundIntervals {
    /// Resolve the intervals for a logical round number
    ///
    /// # Errors
    /// `Configuration` when the round has no template, when a borrowing
    /// variant finds no `circuit_round` template, when a round has no
    /// exercises, or when its duration does not fit in a `u64`.
    pub fn resolve(config: &RoundTemplateConfig, round_number: u32) -> Result<Self> {
        let template = config.template(round_number).ok_or_else(|| {
            SetlistError::Configuration(format!("no round template for round {}", round_number))
        })?;

        let intervals = match template.variant {
            RoundVariant::CircuitRound {
                work_duration_sec,
                rest_duration_sec,
                exercises_per_round,
            }
            | RoundVariant::WarmupCooldownRound {
                work_duration_sec,
                rest_duration_sec,
                exercises_per_round,
            } => RoundIntervals {
                work_ms: secs_to_ms(work_duration_sec),
                rest_ms: secs_to_ms(rest_duration_sec),
                exercises: exercises_per_round,
                continuous: false,
            },
            RoundVariant::StationsRound { exercises_per_round } => {
                let (work_ms, rest_ms) = borrowed_intervals(config, "stations", round_number)?;
                RoundIntervals {
                    work_ms,
                    rest_ms,
                    exercises: exercises_per_round,
                    continuous: false,
                }
            }
            RoundVariant::AmrapRound { exercises_per_round } => {
                let (work_ms, _) = borrowed_intervals(config, "amrap", round_number)?;
                RoundIntervals {
                    work_ms,
                    rest_ms: 0,
                    exercises: exercises_per_round,
                    continuous: true,
                }
            }
        };

        if intervals.exercises == 0 {
            return Err(SetlistError::Configuration(format!(
                "round {} ({}) has no exercises",
                round_number,
                template.variant.type_name()
            )));
        }

        if intervals.checked_exercise_duration_ms().is_none() {
            return Err(SetlistError::Configuration(format!(
                "round {} duration overflows",
                round_number
            )));
        }

        Ok(intervals)
    }

    fn checked_exercise_duration_ms(&self) -> Option<u64> {
        let n = u64::from(self.exercises);
        let work = n.checked_mul(self.work_ms)?;
        let rest = n.saturating_sub(1).checked_mul(self.rest_ms)?;
        work.checked_add(rest)
    }

    /// Time from work start to the end of the last exercise
    ///
    /// Bounded by [`resolve`](Self::resolve); the other totals below are
    /// never larger than this.
    pub fn exercise_duration_ms(&self) -> u64 {
        let n = u64::from(self.exercises);
        n * self.work_ms + n.saturating_sub(1) * self.rest_ms
    }

    /// Offset from work start to the start of the final exercise
    pub fn last_exercise_offset_ms(&self) -> u64 {
        u64::from(self.exercises).saturating_sub(1) * (self.work_ms + self.rest_ms)
    }

    pub fn work_total_ms(&self) -> u64 {
        u64::from(self.exercises) * self.work_ms
    }

    pub fn rest_total_ms(&self) -> u64 {
        u64::from(self.exercises).saturating_sub(1) * self.rest_ms
    }
}

fn borrowed_intervals(
    config: &RoundTemplateConfig,
    kind: &str,
    round_number: u32,
) -> Result<(u64, u64)> {
    match config.circuit_template().map(|t| t.variant) {
        Some(RoundVariant::CircuitRound {
            work_duration_sec,
            rest_duration_sec,
            ..
        }) => Ok((secs_to_ms(work_duration_sec), secs_to_ms(rest_duration_sec))),
        _ => Err(SetlistError::Configuration(format!(
            "{} round requires a circuit_round template (round {})",
            kind, round_number
        ))),
    }
}
