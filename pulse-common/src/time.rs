//! Timestamp utilities

use chrono::{DateTime, Utc};

/// Milliseconds per second, used for every seconds → timeline conversion
pub const MS_PER_SECOND: u64 = 1000;

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Convert whole seconds (as stored in round templates) to timeline milliseconds
pub fn secs_to_ms(seconds: u32) -> u64 {
    u64::from(seconds) * MS_PER_SECOND
}
