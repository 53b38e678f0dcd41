//! Setlist generator
//!
//! Computes the timeline once, then walks the rounds: pick a hype track,
//! evaluate how far it carries, resolve when the second track starts and
//! pick that track from the matching pool.
//!
//! Generation is all-or-nothing. A session half-populated with music cues
//! is worse than one that fails to generate, so any missing track fails
//! the whole call and no partial setlist is returned.

use super::{CircuitSetlist, CoverageScenario, RoundSetlist, SetlistTrack};
use crate::error::{Result, SetlistError};
use crate::selection::{RandomSource, TrackPools, TrackSelector};
use crate::timing::{coverage, trigger, RoundTimingCalculator};
use pulse_common::human_time::format_timeline_ms;
use pulse_common::{time, RoundTemplateConfig, TrackUsage};
use tracing::{info, warn};

/// Builds setlists using an injected random source
pub struct SetlistGenerator<'r, R: RandomSource + ?Sized> {
    rng: &'r mut R,
}

impl<'r, R: RandomSource + ?Sized> SetlistGenerator<'r, R> {
    pub fn new(rng: &'r mut R) -> Self {
        Self { rng }
    }

    /// Generate a setlist for `total_rounds` rounds
    ///
    /// `total_rounds` already includes the `repeat_rounds` doubling.
    /// Track usage is tracked across all rounds of this call only.
    ///
    /// # Errors
    /// - `Configuration` from the timing calculation or trigger resolution
    /// - `TrackUnavailable` when the hype pool is empty, or when the
    ///   second-track pool and the bridge fallback are both empty
    pub fn generate(
        &mut self,
        config: &RoundTemplateConfig,
        total_rounds: u32,
        pools: &TrackPools,
    ) -> Result<CircuitSetlist> {
        let timing = RoundTimingCalculator::calculate(config, total_rounds)?;

        info!(
            rounds = timing.rounds.len(),
            duration = %format_timeline_ms(timing.total_workout_duration_ms),
            hype_pool = pools.hype.len(),
            bridge_pool = pools.bridge.len(),
            rest_pool = pools.rest.len(),
            "Generating circuit setlist"
        );

        let mut selector = TrackSelector::new(&mut *self.rng);
        let mut rounds = Vec::with_capacity(timing.rounds.len());

        for round in &timing.rounds {
            let track1 = selector.select(&pools.hype).ok_or_else(|| {
                SetlistError::no_tracks_for_round(TrackUsage::Hype, round.round_number)
            })?;

            let cov = coverage::evaluate(
                &track1.id,
                track1.duration_ms,
                track1.hype_offset_sec,
                round,
            );
            let second = trigger::resolve(&cov, round, config, round.round_number)?;
            let wanted = second.trigger_type.usage();

            let track2 = match selector.select(pools.pool(wanted)) {
                Some(track) => track,
                None => {
                    warn!(
                        round_number = round.round_number,
                        usage = %wanted,
                        "No {} tracks, falling back to bridge pool",
                        wanted
                    );
                    selector.select(&pools.bridge).ok_or_else(|| SetlistError::TrackUnavailable {
                        usage: wanted,
                        round_number: Some(round.round_number),
                        detail: format!(
                            "no {} tracks available for round {} and bridge fallback is empty",
                            wanted, round.round_number
                        ),
                    })?
                }
            };

            let coverage_scenario = if cov.covers_full_round {
                CoverageScenario::FullCoverage
            } else {
                CoverageScenario::BridgeNeeded
            };

            info!(
                round_number = round.round_number,
                track1 = %track1.name,
                track2 = %track2.name,
                trigger = %format_timeline_ms(second.trigger_time_ms),
                scenario = coverage_scenario.as_str(),
                "Round setlist planned"
            );

            rounds.push(RoundSetlist {
                round_number: round.round_number,
                round_index: round.round_index,
                track1: SetlistTrack::scheduled(track1, round.countdown_start_ms, TrackUsage::Hype),
                track2: SetlistTrack::scheduled(track2, second.trigger_time_ms, wanted),
                coverage_scenario,
                coverage: cov,
            });
        }

        Ok(CircuitSetlist {
            total_tracks: rounds.len() * 2,
            rounds,
            generated_at: time::now(),
        })
    }
}
