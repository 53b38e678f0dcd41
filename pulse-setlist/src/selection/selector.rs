//! Track selector
//!
//! Maximizes variety across a session: an unused track is always preferred.
//! Once every track in a pool has been used, repeats are allowed rather
//! than failing.

use super::RandomSource;
use pulse_common::Track;
use std::collections::HashSet;
use tracing::debug;

/// Picks tracks while remembering which ids this generation already used
///
/// One selector lives for exactly one generation call; the used-id set is
/// never shared between generations.
pub struct TrackSelector<'r, R: RandomSource + ?Sized> {
    rng: &'r mut R,
    used_ids: HashSet<String>,
}

impl<'r, R: RandomSource + ?Sized> TrackSelector<'r, R> {
    pub fn new(rng: &'r mut R) -> Self {
        Self {
            rng,
            used_ids: HashSet::new(),
        }
    }

    /// Select a track from `pool`
    ///
    /// - Unused tracks exist: pick one uniformly, mark it used.
    /// - Pool exhausted: pick uniformly from the whole pool (a repeat).
    /// - Pool empty: `None`.
    pub fn select<'p>(&mut self, pool: &'p [Track]) -> Option<&'p Track> {
        let unused: Vec<&Track> = pool
            .iter()
            .filter(|t| !self.used_ids.contains(&t.id))
            .collect();

        if !unused.is_empty() {
            let selected = unused[self.rng.pick_index(unused.len())];
            self.used_ids.insert(selected.id.clone());
            return Some(selected);
        }

        if pool.is_empty() {
            return None;
        }

        let selected = &pool[self.rng.pick_index(pool.len())];
        debug!(track_id = %selected.id, pool_size = pool.len(), "Pool exhausted, repeating track");
        Some(selected)
    }

    pub fn is_used(&self, track_id: &str) -> bool {
        self.used_ids.contains(track_id)
    }

    pub fn used_count(&self) -> usize {
        self.used_ids.len()
    }
}
