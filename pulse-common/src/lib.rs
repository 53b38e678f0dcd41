//! # Pulse Common Library
//!
//! Shared code for the Pulse circuit-workout music tools:
//! - Track and round template records
//! - Bootstrap configuration loading
//! - Database initialization
//! - Timestamp and human-readable timeline helpers

pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod human_time;
pub mod models;
pub mod time;

pub use error::{Error, Result};
pub use models::{RoundTemplate, RoundTemplateConfig, RoundVariant, Track, TrackUsage};
