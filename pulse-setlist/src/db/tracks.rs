//! Track repository
//!
//! Tracks live in `tracks`, with one `track_usages` row per usage tag.

use crate::error::{Result, SetlistError};
use async_trait::async_trait;
use pulse_common::{Track, TrackUsage};
use sqlx::{Row, SqlitePool};
use std::collections::BTreeSet;

/// Source of candidate tracks by usage tag
#[async_trait]
pub trait TrackRepository: Send + Sync {
    /// All tracks tagged with `usage`, ordered by id
    async fn tracks_by_usage(&self, usage: TrackUsage) -> Result<Vec<Track>>;
}

/// SQLite-backed repository
#[derive(Debug, Clone)]
pub struct SqliteTrackRepository {
    pool: SqlitePool,
}

impl SqliteTrackRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl TrackRepository for SqliteTrackRepository {
    async fn tracks_by_usage(&self, usage: TrackUsage) -> Result<Vec<Track>> {
        let rows = sqlx::query(
            r#"
            SELECT t.id, t.name, t.duration_ms, t.hype_offset_sec,
                   (SELECT GROUP_CONCAT(u.usage)
                    FROM track_usages u
                    WHERE u.track_id = t.id) AS usages
            FROM tracks t
            WHERE EXISTS (
                SELECT 1 FROM track_usages u WHERE u.track_id = t.id AND u.usage = ?
            )
            ORDER BY t.id
            "#,
        )
        .bind(usage.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let duration_ms: i64 = row.get("duration_ms");
                let usages: Option<String> = row.get("usages");

                Ok(Track {
                    id: row.get("id"),
                    name: row.get("name"),
                    duration_ms: u64::try_from(duration_ms).map_err(|_| {
                        SetlistError::Repository(format!("negative duration {}", duration_ms))
                    })?,
                    usage_tags: parse_usages(usages.as_deref())?,
                    hype_offset_sec: row.get("hype_offset_sec"),
                })
            })
            .collect()
    }
}

fn parse_usages(raw: Option<&str>) -> Result<BTreeSet<TrackUsage>> {
    raw.unwrap_or_default()
        .split(',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<TrackUsage>().map_err(SetlistError::from))
        .collect()
}

/// Insert or update a track and replace its usage tags
pub async fn save_track(pool: &SqlitePool, track: &Track) -> Result<()> {
    let duration_ms = i64::try_from(track.duration_ms)
        .map_err(|_| SetlistError::Repository(format!("duration too large for {}", track.id)))?;

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO tracks (id, name, duration_ms, hype_offset_sec, created_at, updated_at)
        VALUES (?, ?, ?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            duration_ms = excluded.duration_ms,
            hype_offset_sec = excluded.hype_offset_sec,
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(&track.id)
    .bind(&track.name)
    .bind(duration_ms)
    .bind(track.hype_offset_sec)
    .execute(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM track_usages WHERE track_id = ?")
        .bind(&track.id)
        .execute(&mut *tx)
        .await?;

    for usage in &track.usage_tags {
        sqlx::query("INSERT INTO track_usages (track_id, usage) VALUES (?, ?)")
            .bind(&track.id)
            .bind(usage.as_str())
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Repository over an in-memory track list (JSON track files, tests)
#[derive(Debug, Clone, Default)]
pub struct InMemoryTrackRepository {
    tracks: Vec<Track>,
}

impl InMemoryTrackRepository {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    /// Load a JSON array of tracks
    pub fn from_json_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let tracks: Vec<Track> = serde_json::from_str(&content)
            .map_err(|e| SetlistError::Parse(format!("{}: {}", path.display(), e)))?;
        Ok(Self::new(tracks))
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}

#[async_trait]
impl TrackRepository for InMemoryTrackRepository {
    async fn tracks_by_usage(&self, usage: TrackUsage) -> Result<Vec<Track>> {
        let mut tracks: Vec<Track> = self
            .tracks
            .iter()
            .filter(|t| t.has_usage(usage))
            .cloned()
            .collect();
        tracks.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(tracks)
    }
}
