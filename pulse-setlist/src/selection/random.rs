//! Injectable random source for track selection
//!
//! Selection never reaches for a global RNG. Production code wraps a
//! `rand` generator in [`RngSource`]; deterministic callers script exact
//! picks with [`ScriptedSource`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Uniform index picker
pub trait RandomSource {
    /// Pick an index in `0..len`. Callers never pass `len == 0`.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// `rand`-backed source
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible sequence for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Replays a fixed list of picks, cycling when exhausted
///
/// Each scripted value is reduced modulo the pool length, so a script
/// stays valid whatever pool it is applied to.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: VecDeque<usize>,
}

impl ScriptedSource {
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: picks.into_iter().collect(),
        }
    }

    /// Always picks the first candidate
    pub fn first() -> Self {
        Self::new([0])
    }
}

impl RandomSource for ScriptedSource {
    fn pick_index(&mut self, len: usize) -> usize {
        match self.script.pop_front() {
            Some(pick) => {
                self.script.push_back(pick);
                pick % len
            }
            None => 0,
        }
    }
}
