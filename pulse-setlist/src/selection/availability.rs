//! Pre-flight availability check
//!
//! Run before generation: empty pools are hard issues that make generation
//! impossible; pools smaller than the round count are soft issues (tracks
//! will repeat) that do not block generation.

use pulse_common::{Track, TrackUsage};
use serde::Serialize;

/// Result of the availability check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityReport {
    /// False only when at least one pool is empty
    pub is_valid: bool,
    pub issues: Vec<String>,
}

/// Check whether each usage pool can serve `total_rounds` rounds
pub fn validate_availability(
    hype: &[Track],
    bridge: &[Track],
    rest: &[Track],
    total_rounds: u32,
) -> AvailabilityReport {
    let mut issues = Vec::new();
    let mut is_valid = true;

    for (usage, pool) in [
        (TrackUsage::Hype, hype),
        (TrackUsage::Bridge, bridge),
        (TrackUsage::Rest, rest),
    ] {
        if pool.is_empty() {
            is_valid = false;
            issues.push(format!("no {} tracks available", usage));
        } else if pool.len() < total_rounds as usize {
            issues.push(format!(
                "only {} {} tracks for {} rounds - will repeat",
                pool.len(),
                usage,
                total_rounds
            ));
        }
    }

    AvailabilityReport { is_valid, issues }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracks(prefix: &str, n: usize) -> Vec<Track> {
        (0..n)
            .map(|i| Track::new(format!("{}{}", prefix, i), format!("{} {}", prefix, i), 200_000))
            .collect()
    }

    #[test]
    fn test_empty_hype_pool_is_invalid() {
        let report = validate_availability(&[], &tracks("b", 1), &tracks("r", 1), 5);
        assert!(!report.is_valid);
        assert!(report.issues.iter().any(|i| i == "no hype tracks available"));
    }

    #[test]
    fn test_thin_pools_are_soft_issues() {
        let report = validate_availability(&tracks("h", 2), &tracks("b", 5), &tracks("r", 3), 5);
        assert!(report.is_valid);
        assert_eq!(
            report.issues,
            vec![
                "only 2 hype tracks for 5 rounds - will repeat".to_string(),
                "only 3 rest tracks for 5 rounds - will repeat".to_string(),
            ]
        );
    }

    #[test]
    fn test_ample_pools_have_no_issues() {
        let report = validate_availability(&tracks("h", 4), &tracks("b", 4), &tracks("r", 4), 4);
        assert!(report.is_valid);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_all_empty_reports_every_pool() {
        let report = validate_availability(&[], &[], &[], 1);
        assert!(!report.is_valid);
        assert_eq!(report.issues.len(), 3);
    }
}
