//! Setlist service
//!
//! The async boundary around the pure core. Pools are fetched from the
//! repository once per call, before any timing math; everything after
//! that is synchronous and CPU-bound.

use crate::db::TrackRepository;
use crate::error::{Result, SetlistError};
use crate::selection::{validate_availability, AvailabilityReport, RandomSource, TrackPools};
use crate::setlist::{CircuitSetlist, SetlistGenerator};
use pulse_common::{RoundTemplateConfig, TrackUsage};
use tracing::{info, warn};

/// Generates setlists from tracks held in a repository
pub struct SetlistService<T: TrackRepository> {
    repository: T,
}

impl<T: TrackRepository> SetlistService<T> {
    pub fn new(repository: T) -> Self {
        Self { repository }
    }

    /// Fetch the three usage pools concurrently
    pub async fn load_pools(&self) -> Result<TrackPools> {
        let (hype, bridge, rest) = tokio::try_join!(
            self.repository.tracks_by_usage(TrackUsage::Hype),
            self.repository.tracks_by_usage(TrackUsage::Bridge),
            self.repository.tracks_by_usage(TrackUsage::Rest),
        )?;

        Ok(TrackPools::new(hype, bridge, rest))
    }

    /// Pre-flight availability report
    pub async fn check_availability(&self, total_rounds: u32) -> Result<AvailabilityReport> {
        let pools = self.load_pools().await?;
        Ok(validate_availability(&pools.hype, &pools.bridge, &pools.rest, total_rounds))
    }

    /// Validate availability, then generate
    ///
    /// Thin pools are logged and generation proceeds. Empty pools fail with
    /// `TrackUnavailable` before any timing work.
    pub async fn generate<R: RandomSource + ?Sized>(
        &self,
        config: &RoundTemplateConfig,
        total_rounds: u32,
        rng: &mut R,
    ) -> Result<CircuitSetlist> {
        let pools = self.load_pools().await?;
        let report = validate_availability(&pools.hype, &pools.bridge, &pools.rest, total_rounds);

        if !report.is_valid {
            let usage = first_empty_usage(&pools).unwrap_or(TrackUsage::Hype);
            return Err(SetlistError::TrackUnavailable {
                usage,
                round_number: None,
                detail: report.issues.join("; "),
            });
        }

        for issue in &report.issues {
            warn!("Track availability: {}", issue);
        }

        let setlist = SetlistGenerator::new(rng).generate(config, total_rounds, &pools)?;
        info!(
            "Generated setlist: {} rounds, {} tracks",
            setlist.rounds.len(),
            setlist.total_tracks
        );

        Ok(setlist)
    }
}

fn first_empty_usage(pools: &TrackPools) -> Option<TrackUsage> {
    TrackUsage::all_variants()
        .into_iter()
        .find(|usage| pools.pool(*usage).is_empty())
}
