//! Track storage access
//!
//! The setlist core never touches storage directly; it receives pools
//! fetched through [`TrackRepository`].

pub mod tracks;

pub use tracks::{save_track, InMemoryTrackRepository, SqliteTrackRepository, TrackRepository};
