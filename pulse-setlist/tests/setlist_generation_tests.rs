//! Integration tests for timeline calculation and setlist generation
//!
//! Covers the session-level properties: countdown and contiguity of the
//! timeline, coverage and trigger placement, track rotation across rounds,
//! and trigger lookup under repeated rounds.

use std::collections::HashSet;

use pulse_common::{RoundTemplate, RoundTemplateConfig, RoundVariant, Track, TrackUsage};
use pulse_setlist::selection::{validate_availability, TrackSelector};
use pulse_setlist::timing::{coverage, COUNTDOWN_MS};
use pulse_setlist::{
    CoverageScenario, RngSource, RoundTimingCalculator, ScriptedSource, SetlistError,
    SetlistGenerator, TrackPools,
};

// ============================================================================
// Test helpers
// ============================================================================

fn circuit(round_number: u32, work: u32, rest: u32, exercises: u32) -> RoundTemplate {
    RoundTemplate {
        round_number,
        variant: RoundVariant::CircuitRound {
            work_duration_sec: work,
            rest_duration_sec: rest,
            exercises_per_round: exercises,
        },
    }
}

/// Three identical 40/20 x5 circuit rounds with 60s between rounds
fn three_round_circuit() -> RoundTemplateConfig {
    RoundTemplateConfig {
        rest_between_rounds_seconds: 60,
        repeat_rounds: false,
        round_templates: (1..=3).map(|n| circuit(n, 40, 20, 5)).collect(),
    }
}

fn track(id: &str, usage: TrackUsage, duration_ms: u64) -> Track {
    Track::new(id, format!("Track {}", id), duration_ms).with_usage(usage)
}

fn pools(hype: Vec<Track>, bridge: Vec<Track>, rest: Vec<Track>) -> TrackPools {
    TrackPools::new(hype, bridge, rest)
}

// ============================================================================
// Timeline properties
// ============================================================================

#[test]
fn test_three_round_circuit_timeline() {
    let timing = RoundTimingCalculator::calculate(&three_round_circuit(), 3).unwrap();

    assert_eq!(timing.rounds.len(), 3);

    let first = &timing.rounds[0];
    assert_eq!(first.countdown_start_ms, 0);
    assert_eq!(first.work_start_ms, 6000);
    assert_eq!(first.total_duration_ms, 286_000);
    assert_eq!(first.end_time_ms, 286_000);

    assert_eq!(timing.rounds[1].countdown_start_ms, 346_000);
    assert_eq!(timing.rounds[2].countdown_start_ms, 692_000);

    // No rest after the last round
    assert_eq!(timing.total_workout_duration_ms, 692_000 + 286_000);
}

#[test]
fn test_countdown_and_contiguity_hold_for_mixed_sessions() {
    let config = RoundTemplateConfig {
        rest_between_rounds_seconds: 45,
        repeat_rounds: false,
        round_templates: vec![
            RoundTemplate {
                round_number: 1,
                variant: RoundVariant::WarmupCooldownRound {
                    work_duration_sec: 30,
                    rest_duration_sec: 0,
                    exercises_per_round: 4,
                },
            },
            circuit(2, 45, 15, 6),
            RoundTemplate {
                round_number: 3,
                variant: RoundVariant::StationsRound { exercises_per_round: 3 },
            },
            RoundTemplate {
                round_number: 4,
                variant: RoundVariant::AmrapRound { exercises_per_round: 2 },
            },
        ],
    };

    for total_rounds in 0..=4 {
        let timing = RoundTimingCalculator::calculate(&config, total_rounds).unwrap();
        assert_eq!(timing.rounds.len(), total_rounds as usize);

        for round in &timing.rounds {
            assert_eq!(round.work_start_ms - round.countdown_start_ms, COUNTDOWN_MS);
            assert_eq!(round.end_time_ms - round.countdown_start_ms, round.total_duration_ms);
        }
        for pair in timing.rounds.windows(2) {
            assert_eq!(pair[1].countdown_start_ms, pair[0].end_time_ms + 45_000);
        }
    }
}

#[test]
fn test_missing_template_is_configuration_error() {
    let err = RoundTimingCalculator::calculate(&three_round_circuit(), 4).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("round 4"));
}

// ============================================================================
// Coverage and trigger placement
// ============================================================================

#[test]
fn test_short_hype_track_bridges_at_last_exercise() {
    let config = three_round_circuit();
    let timing = RoundTimingCalculator::calculate(&config, 1).unwrap();

    let cov = coverage::evaluate("h1", 220_000, Some(30.0), &timing.rounds[0]);
    assert_eq!(cov.effective_duration_ms, 195_000);
    assert!(!cov.covers_full_round);

    let pools = pools(
        vec![track("h1", TrackUsage::Hype, 220_000).with_hype_offset(30.0)],
        vec![track("b1", TrackUsage::Bridge, 180_000)],
        vec![track("r1", TrackUsage::Rest, 180_000)],
    );
    let mut rng = ScriptedSource::first();
    let setlist = SetlistGenerator::new(&mut rng).generate(&config, 1, &pools).unwrap();

    let round = &setlist.rounds[0];
    assert_eq!(round.coverage_scenario, CoverageScenario::BridgeNeeded);
    assert_eq!(round.track1.trigger_time_ms, 0);
    assert_eq!(round.track1.usage, TrackUsage::Hype);
    assert_eq!(round.track2.track_id, "b1");
    assert_eq!(round.track2.usage, TrackUsage::Bridge);
    assert_eq!(round.track2.trigger_time_ms, 246_000);
}

#[test]
fn test_covering_hype_track_hands_off_at_round_end() {
    let config = three_round_circuit();
    let pools = pools(
        vec![track("h1", TrackUsage::Hype, 286_000)],
        vec![track("b1", TrackUsage::Bridge, 180_000)],
        vec![track("r1", TrackUsage::Rest, 180_000)],
    );
    let mut rng = ScriptedSource::first();
    let setlist = SetlistGenerator::new(&mut rng).generate(&config, 1, &pools).unwrap();

    let round = &setlist.rounds[0];
    assert_eq!(round.coverage_scenario, CoverageScenario::FullCoverage);
    assert!(round.coverage.covers_full_round);
    assert_eq!(round.track2.track_id, "r1");
    assert_eq!(round.track2.usage, TrackUsage::Rest);
    assert_eq!(round.track2.trigger_time_ms, 286_000);
}

#[test]
fn test_repeated_rounds_trigger_from_logical_template() {
    // Round 2 is shorter than round 1, so a trigger computed from the
    // session position instead of the round number would land elsewhere
    let config = RoundTemplateConfig {
        rest_between_rounds_seconds: 60,
        repeat_rounds: true,
        round_templates: vec![circuit(1, 40, 20, 5), circuit(2, 30, 10, 3)],
    };

    let timing = RoundTimingCalculator::calculate(&config, 4).unwrap();
    let numbers: Vec<u32> = timing.rounds.iter().map(|r| r.round_number).collect();
    assert_eq!(numbers, vec![1, 2, 1, 2]);
    assert_eq!(timing.rounds[2].countdown_start_ms, 522_000);
    assert_eq!(timing.rounds[3].countdown_start_ms, 868_000);

    let pools = pools(
        vec![track("h1", TrackUsage::Hype, 10_000)],
        vec![track("b1", TrackUsage::Bridge, 180_000)],
        vec![track("r1", TrackUsage::Rest, 180_000)],
    );
    let mut rng = ScriptedSource::first();
    let setlist = SetlistGenerator::new(&mut rng).generate(&config, 4, &pools).unwrap();

    let triggers: Vec<u64> = setlist.rounds.iter().map(|r| r.track2.trigger_time_ms).collect();
    assert_eq!(triggers, vec![246_000, 432_000, 768_000, 954_000]);

    let third = &setlist.rounds[2];
    assert_eq!(third.round_number, 1);
    assert_eq!(third.round_index, 2);
}

#[test]
fn test_repeat_rounds_with_odd_count_is_rejected() {
    let config = RoundTemplateConfig {
        rest_between_rounds_seconds: 60,
        repeat_rounds: true,
        round_templates: vec![circuit(1, 40, 20, 5), circuit(2, 30, 10, 3)],
    };

    let err = RoundTimingCalculator::calculate(&config, 3).unwrap_err();
    assert!(matches!(err, SetlistError::Configuration(_)));
}

// ============================================================================
// Track rotation
// ============================================================================

#[test]
fn test_selector_never_repeats_while_unused_tracks_remain() {
    let pool: Vec<Track> = (0..6)
        .map(|i| track(&format!("h{}", i), TrackUsage::Hype, 200_000))
        .collect();
    let mut rng = RngSource::seeded(7);
    let mut selector = TrackSelector::new(&mut rng);

    let picked: HashSet<String> = (0..6)
        .map(|_| selector.select(&pool).unwrap().id.clone())
        .collect();
    assert_eq!(picked.len(), 6);

    // Exhausted pool still yields tracks
    for _ in 0..3 {
        assert!(selector.select(&pool).is_some());
    }
}

#[test]
fn test_two_hype_tracks_over_five_rounds() {
    let config = RoundTemplateConfig {
        rest_between_rounds_seconds: 60,
        repeat_rounds: false,
        round_templates: (1..=5).map(|n| circuit(n, 40, 20, 5)).collect(),
    };
    let pools = pools(
        vec![
            track("h1", TrackUsage::Hype, 300_000),
            track("h2", TrackUsage::Hype, 300_000),
        ],
        vec![track("b1", TrackUsage::Bridge, 180_000)],
        vec![
            track("r1", TrackUsage::Rest, 180_000),
            track("r2", TrackUsage::Rest, 180_000),
        ],
    );

    for seed in 0..10 {
        let mut rng = RngSource::seeded(seed);
        let setlist = SetlistGenerator::new(&mut rng).generate(&config, 5, &pools).unwrap();

        assert_eq!(setlist.rounds.len(), 5);
        assert_eq!(setlist.total_tracks, 10);
        assert_ne!(setlist.rounds[0].track1.track_id, setlist.rounds[1].track1.track_id);
        for round in &setlist.rounds {
            assert!(["h1", "h2"].contains(&round.track1.track_id.as_str()));
        }
    }
}

#[test]
fn test_empty_rest_pool_falls_back_to_bridge() {
    let pools = pools(
        vec![track("h1", TrackUsage::Hype, 300_000)],
        vec![track("b1", TrackUsage::Bridge, 180_000)],
        Vec::new(),
    );
    let mut rng = ScriptedSource::first();
    let setlist = SetlistGenerator::new(&mut rng)
        .generate(&three_round_circuit(), 1, &pools)
        .unwrap();

    let track2 = &setlist.rounds[0].track2;
    assert_eq!(track2.track_id, "b1");
    assert_eq!(track2.usage, TrackUsage::Rest);
}

#[test]
fn test_generation_is_all_or_nothing() {
    let pools = pools(
        vec![track("h1", TrackUsage::Hype, 300_000)],
        Vec::new(),
        Vec::new(),
    );
    let mut rng = ScriptedSource::first();

    match SetlistGenerator::new(&mut rng).generate(&three_round_circuit(), 3, &pools) {
        Err(SetlistError::TrackUnavailable { usage, round_number, .. }) => {
            assert_eq!(usage, TrackUsage::Rest);
            assert_eq!(round_number, Some(1));
        }
        other => panic!("expected TrackUnavailable, got {:?}", other),
    }
}

// ============================================================================
// Availability
// ============================================================================

#[test]
fn test_availability_without_hype_tracks() {
    let report = validate_availability(
        &[],
        &[track("b1", TrackUsage::Bridge, 180_000)],
        &[track("r1", TrackUsage::Rest, 180_000)],
        5,
    );

    assert!(!report.is_valid);
    assert!(report.issues.iter().any(|i| i.contains("no hype tracks available")));
}

#[test]
fn test_setlist_serializes_for_callers() {
    let pools = pools(
        vec![track("h1", TrackUsage::Hype, 220_000).with_hype_offset(30.0)],
        vec![track("b1", TrackUsage::Bridge, 180_000)],
        vec![track("r1", TrackUsage::Rest, 180_000)],
    );
    let mut rng = ScriptedSource::first();
    let setlist = SetlistGenerator::new(&mut rng)
        .generate(&three_round_circuit(), 1, &pools)
        .unwrap();

    let value = serde_json::to_value(&setlist).unwrap();
    let round = &value["rounds"][0];
    assert_eq!(round["coverage_scenario"], "bridge-needed");
    assert_eq!(round["track1"]["usage"], "hype");
    assert_eq!(round["track2"]["trigger_time_ms"], 246_000);
    assert_eq!(value["total_tracks"], 2);
}
