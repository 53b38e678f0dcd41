//! Error type shared by the Pulse crates
//!
//! Covers the failures that can happen below the setlist core: opening
//! the track database, reading bootstrap files and parsing stored values.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Track database could not be opened or queried
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bootstrap TOML is malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// A stored or user-supplied value does not parse, e.g. an unknown usage tag
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
