//! Error types for pulse-setlist
//!
//! Two kinds matter to callers: configuration problems (bad round
//! templates, never retried) and track unavailability (an empty usage
//! pool). Both are fatal for a whole generation; no partial setlist is
//! ever returned.

use pulse_common::TrackUsage;
use thiserror::Error;

/// Main error type for pulse-setlist
#[derive(Error, Debug)]
pub enum SetlistError {
    /// Round template data is missing or inconsistent
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A usage pool had no track when a round needed one
    #[error("Track unavailable: {detail}")]
    TrackUnavailable {
        usage: TrackUsage,
        round_number: Option<u32>,
        detail: String,
    },

    /// Track storage could not be read or written
    #[error("Repository error: {0}")]
    Repository(String),

    /// Malformed session or track file
    #[error("Parse error: {0}")]
    Parse(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// pulse-common error
    #[error("Common error: {0}")]
    Common(#[from] pulse_common::Error),
}

impl SetlistError {
    /// Track unavailable for a specific round
    pub fn no_tracks_for_round(usage: TrackUsage, round_number: u32) -> Self {
        SetlistError::TrackUnavailable {
            usage,
            round_number: Some(round_number),
            detail: format!("no {} tracks available for round {}", usage, round_number),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, SetlistError::Configuration(_))
    }

    pub fn is_track_unavailable(&self) -> bool {
        matches!(self, SetlistError::TrackUnavailable { .. })
    }
}

impl From<sqlx::Error> for SetlistError {
    fn from(err: sqlx::Error) -> Self {
        SetlistError::Repository(err.to_string())
    }
}

/// Convenience Result type using SetlistError
pub type Result<T> = std::result::Result<T, SetlistError>;
