//! Human-readable setlist summary

use super::CircuitSetlist;
use pulse_common::human_time::format_timeline_ms;

/// One header line, then one line per round:
///
/// ```text
/// Circuit Setlist (2 rounds):
/// Round 1: Anthem @ 0:00 → Lift Off @ 4:06 (bridge)
/// Round 2: Long Run @ 5:46 → Cool Air @ 10:32 (rest)
/// ```
pub fn setlist_summary(setlist: &CircuitSetlist) -> String {
    let mut lines = Vec::with_capacity(setlist.rounds.len() + 1);
    lines.push(format!("Circuit Setlist ({} rounds):", setlist.rounds.len()));

    for round in &setlist.rounds {
        lines.push(format!(
            "Round {}: {} @ {} → {} @ {} ({})",
            round.round_number,
            round.track1.track_name,
            format_timeline_ms(round.track1.trigger_time_ms),
            round.track2.track_name,
            format_timeline_ms(round.track2.trigger_time_ms),
            round.track2.usage,
        ));
    }

    lines.join("\n")
}
