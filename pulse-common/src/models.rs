//! Track and round template records
//!
//! Plain value records shared by the setlist core, the storage layer and
//! the CLI. Durations in templates are whole seconds (as operators enter
//! them); durations on tracks are milliseconds (as audio metadata reports them).

use crate::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// What a track may be used for within a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackUsage {
    /// Started at a round's countdown
    Hype,
    /// Started during the final exercise when the hype track runs out early
    Bridge,
    /// Started at round end, into the rest between rounds
    Rest,
}

impl TrackUsage {
    /// Canonical database / wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackUsage::Hype => "hype",
            TrackUsage::Bridge => "bridge",
            TrackUsage::Rest => "rest",
        }
    }

    pub fn all_variants() -> [TrackUsage; 3] {
        [TrackUsage::Hype, TrackUsage::Bridge, TrackUsage::Rest]
    }
}

impl fmt::Display for TrackUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackUsage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hype" => Ok(TrackUsage::Hype),
            "bridge" => Ok(TrackUsage::Bridge),
            "rest" => Ok(TrackUsage::Rest),
            other => Err(Error::InvalidInput(format!("unknown track usage '{}'", other))),
        }
    }
}

/// A candidate audio track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub duration_ms: u64,

    /// A track may serve several usages
    #[serde(default)]
    pub usage_tags: BTreeSet<TrackUsage>,

    /// Seconds into the track where its energetic peak lands
    #[serde(default)]
    pub hype_offset_sec: Option<f64>,
}

impl Track {
    pub fn new(id: impl Into<String>, name: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration_ms,
            usage_tags: BTreeSet::new(),
            hype_offset_sec: None,
        }
    }

    pub fn with_usage(mut self, usage: TrackUsage) -> Self {
        self.usage_tags.insert(usage);
        self
    }

    pub fn with_hype_offset(mut self, offset_sec: f64) -> Self {
        self.hype_offset_sec = Some(offset_sec);
        self
    }

    pub fn has_usage(&self, usage: TrackUsage) -> bool {
        self.usage_tags.contains(&usage)
    }
}

/// Per-variant payload of a round template
///
/// `stations_round` and `amrap_round` carry no interval timing of their own;
/// they borrow it from the session's `circuit_round` template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoundVariant {
    CircuitRound {
        work_duration_sec: u32,
        rest_duration_sec: u32,
        exercises_per_round: u32,
    },
    StationsRound {
        exercises_per_round: u32,
    },
    AmrapRound {
        exercises_per_round: u32,
    },
    WarmupCooldownRound {
        work_duration_sec: u32,
        rest_duration_sec: u32,
        exercises_per_round: u32,
    },
}

impl RoundVariant {
    pub fn exercises_per_round(&self) -> u32 {
        match *self {
            RoundVariant::CircuitRound { exercises_per_round, .. }
            | RoundVariant::StationsRound { exercises_per_round }
            | RoundVariant::AmrapRound { exercises_per_round }
            | RoundVariant::WarmupCooldownRound { exercises_per_round, .. } => exercises_per_round,
        }
    }

    /// Template type name as written in session files
    pub fn type_name(&self) -> &'static str {
        match self {
            RoundVariant::CircuitRound { .. } => "circuit_round",
            RoundVariant::StationsRound { .. } => "stations_round",
            RoundVariant::AmrapRound { .. } => "amrap_round",
            RoundVariant::WarmupCooldownRound { .. } => "warmup_cooldown_round",
        }
    }
}

/// Template for one logical round number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTemplate {
    pub round_number: u32,
    #[serde(flatten)]
    pub variant: RoundVariant,
}

/// Per-session round configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTemplateConfig {
    pub rest_between_rounds_seconds: u32,

    /// Replay the whole template sequence a second time
    #[serde(default)]
    pub repeat_rounds: bool,

    #[serde(default)]
    pub round_templates: Vec<RoundTemplate>,
}

impl RoundTemplateConfig {
    /// Template for a logical round number (1-based)
    pub fn template(&self, round_number: u32) -> Option<&RoundTemplate> {
        self.round_templates
            .iter()
            .find(|t| t.round_number == round_number)
    }

    /// First `circuit_round` template, the interval source for borrowing variants
    pub fn circuit_template(&self) -> Option<&RoundTemplate> {
        self.round_templates
            .iter()
            .find(|t| matches!(t.variant, RoundVariant::CircuitRound { .. }))
    }

    /// Number of rounds actually performed, including the repeated cycle
    pub fn effective_round_count(&self) -> u32 {
        let base = self.round_templates.len() as u32;
        if self.repeat_rounds {
            base * 2
        } else {
            base
        }
    }
}
