//! Database access layer for Showbill
//!
//! Holds the schema plus the query and mutation operations for the three
//! directory entities. Every operation takes an explicit pool handle; no
//! module-level database state.

use crate::{Error, Result};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

pub mod artists;
pub mod models;
pub mod shows;
pub mod venues;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Use sqlite options to create database if it doesn't exist
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys (required for the shows -> venues/artists references)
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL mode allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    // Set busy timeout
    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    // Schema creation is idempotent - safe to call multiple times
    create_venues_table(&pool).await?;
    create_artists_table(&pool).await?;
    create_shows_table(&pool).await?;

    Ok(pool)
}

/// Create the venues table
///
/// Venue names are unique across the directory. Genre tags are stored as a
/// JSON array of strings in a TEXT column.
pub async fn create_venues_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS venues (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            address TEXT NOT NULL,
            phone TEXT NOT NULL,
            genres TEXT NOT NULL,
            image_link TEXT,
            website TEXT,
            facebook_link TEXT,
            seeking_talent INTEGER NOT NULL DEFAULT 0,
            seeking_description TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_venues_name ON venues(name)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_venues_location ON venues(city, state)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the artists table
///
/// Same shape as venues minus the street address; the booking flag is
/// seeking_venue instead of seeking_talent.
pub async fn create_artists_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artists (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            phone TEXT NOT NULL,
            genres TEXT NOT NULL,
            image_link TEXT,
            website TEXT,
            facebook_link TEXT,
            seeking_venue INTEGER NOT NULL DEFAULT 0,
            seeking_description TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_artists_name ON artists(name)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the shows table
///
/// A show links one artist to one venue at a start time. The surrogate guid
/// plus the (venue_id, artist_id, start_time) uniqueness constraint allows
/// the same pair to book repeatedly at different times while rejecting exact
/// duplicate bookings. start_time holds an RFC 3339 UTC timestamp.
pub async fn create_shows_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shows (
            guid TEXT PRIMARY KEY,
            venue_id TEXT NOT NULL REFERENCES venues(guid) ON DELETE CASCADE,
            artist_id TEXT NOT NULL REFERENCES artists(guid) ON DELETE CASCADE,
            start_time TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE (venue_id, artist_id, start_time)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_venue ON shows(venue_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_artist ON shows(artist_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_start_time ON shows(start_time)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Check whether a sqlx error is a UNIQUE constraint violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.message().contains("UNIQUE constraint failed")
    )
}

/// Reject empty required fields before attempting a write
pub(crate) fn require_field(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Conflict(format!("missing required field: {field}")));
    }
    Ok(())
}

/// Build a substring LIKE pattern, escaping the SQL wildcards in the term
///
/// SQLite LIKE is case-insensitive for ASCII, which covers the search
/// contract. An empty term yields `%%` and matches every row.
pub(crate) fn substring_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Serialize genre tags for the TEXT column
pub(crate) fn encode_genres(genres: &[String]) -> Result<String> {
    serde_json::to_string(genres).map_err(|e| Error::Internal(e.to_string()))
}

/// Decode genre tags from the TEXT column
pub(crate) fn decode_genres(raw: &str) -> Result<Vec<String>> {
    serde_json::from_str(raw)
        .map_err(|e| Error::Internal(format!("corrupt genres column: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_pattern_escapes_wildcards() {
        assert_eq!(substring_pattern("hop"), "%hop%");
        assert_eq!(substring_pattern(""), "%%");
        assert_eq!(substring_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn require_field_rejects_blank() {
        assert!(require_field("name", "The Musical Hop").is_ok());
        assert!(require_field("name", "   ").is_err());
    }

    #[test]
    fn genres_round_trip() {
        let genres = vec!["Jazz".to_string(), "Reggae".to_string()];
        let encoded = encode_genres(&genres).unwrap();
        assert_eq!(decode_genres(&encoded).unwrap(), genres);
    }
}
