//! Track selection from usage pools

pub mod availability;
pub mod random;
pub mod selector;

use pulse_common::{Track, TrackUsage};

pub use availability::{validate_availability, AvailabilityReport};
pub use random::{RandomSource, RngSource, ScriptedSource};
pub use selector::TrackSelector;

/// Candidate tracks grouped by usage, fetched once per generation
#[derive(Debug, Clone, Default)]
pub struct TrackPools {
    pub hype: Vec<Track>,
    pub bridge: Vec<Track>,
    pub rest: Vec<Track>,
}

impl TrackPools {
    pub fn new(hype: Vec<Track>, bridge: Vec<Track>, rest: Vec<Track>) -> Self {
        Self { hype, bridge, rest }
    }

    /// Split one track list into pools; a multi-tagged track joins every pool it is tagged for
    pub fn from_tracks<'a>(tracks: impl IntoIterator<Item = &'a Track>) -> Self {
        let mut pools = Self::default();
        for track in tracks {
            for usage in &track.usage_tags {
                pools.pool_mut(*usage).push(track.clone());
            }
        }
        pools
    }

    pub fn pool(&self, usage: TrackUsage) -> &[Track] {
        match usage {
            TrackUsage::Hype => &self.hype,
            TrackUsage::Bridge => &self.bridge,
            TrackUsage::Rest => &self.rest,
        }
    }

    fn pool_mut(&mut self, usage: TrackUsage) -> &mut Vec<Track> {
        match usage {
            TrackUsage::Hype => &mut self.hype,
            TrackUsage::Bridge => &mut self.bridge,
            TrackUsage::Rest => &mut self.rest,
        }
    }
}
