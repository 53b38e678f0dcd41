//! # Pulse Setlist Library (pulse-setlist)
//!
//! Computes a millisecond-accurate timeline for a multi-round circuit
//! workout and plans a two-track music setlist against it, so that track
//! changes land on round boundaries whatever the chosen tracks' lengths.
//!
//! **Pipeline:** round templates → [`timing::RoundTimingCalculator`] →
//! per round: [`selection::TrackSelector`] (hype) → [`timing::coverage`] →
//! [`timing::trigger`] → [`selection::TrackSelector`] (bridge/rest) →
//! [`setlist::CircuitSetlist`].
//!
//! Everything below [`service`] is pure and synchronous. The output is
//! data; nothing here plays audio.

pub mod config;
pub mod db;
pub mod error;
pub mod selection;
pub mod service;
pub mod setlist;
pub mod timing;

pub use error::{Result, SetlistError};
pub use selection::{RandomSource, RngSource, ScriptedSource, TrackPools};
pub use service::SetlistService;
pub use setlist::{CircuitSetlist, CoverageScenario, RoundSetlist, SetlistGenerator, SetlistTrack};
pub use timing::{CircuitTimingResult, RoundTiming, RoundTimingCalculator};
