//! Setlist records and generation
//!
//! A [`CircuitSetlist`] is computed once per generation request and never
//! mutated afterwards; regenerating means calling the generator again.

pub mod generator;
pub mod summary;

use crate::timing::TrackCoverage;
use chrono::{DateTime, Utc};
use pulse_common::{Track, TrackUsage};
use serde::Serialize;

pub use generator::SetlistGenerator;
pub use summary::setlist_summary;

/// Whether the hype track carries the whole round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoverageScenario {
    FullCoverage,
    BridgeNeeded,
}

impl CoverageScenario {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageScenario::FullCoverage => "full-coverage",
            CoverageScenario::BridgeNeeded => "bridge-needed",
        }
    }
}

/// One scheduled track start
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetlistTrack {
    pub track_id: String,
    pub track_name: String,
    pub trigger_time_ms: u64,
    pub usage: TrackUsage,
    pub duration_ms: u64,
    pub hype_offset_sec: Option<f64>,
}

impl SetlistTrack {
    pub fn scheduled(track: &Track, trigger_time_ms: u64, usage: TrackUsage) -> Self {
        Self {
            track_id: track.id.clone(),
            track_name: track.name.clone(),
            trigger_time_ms,
            usage,
            duration_ms: track.duration_ms,
            hype_offset_sec: track.hype_offset_sec,
        }
    }
}

/// The two tracks planned for one round
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSetlist {
    pub round_number: u32,
    pub round_index: u32,
    /// Hype track, started at the round's countdown
    pub track1: SetlistTrack,
    /// Bridge or rest track, started at the resolved trigger
    pub track2: SetlistTrack,
    pub coverage_scenario: CoverageScenario,
    /// Coverage of track1 over this round
    pub coverage: TrackCoverage,
}

/// Complete music plan for a session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircuitSetlist {
    pub rounds: Vec<RoundSetlist>,
    /// Always `2 * rounds.len()`
    pub total_tracks: usize,
    pub generated_at: DateTime<Utc>,
}
