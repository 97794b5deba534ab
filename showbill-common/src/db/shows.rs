//! Show queries and mutations

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::is_unique_violation;
use crate::db::models::{NewShow, Show, ShowListing};
use crate::{Error, Result};

/// List every show with both sides of the booking, ordered by start time
pub async fn list(pool: &SqlitePool) -> Result<Vec<ShowListing>> {
    let rows: Vec<(String, String, String, String, Option<String>, DateTime<Utc>)> =
        sqlx::query_as(
            "SELECT s.venue_id, v.name, s.artist_id, a.name, a.image_link, s.start_time
             FROM shows s
             JOIN venues v ON v.guid = s.venue_id
             JOIN artists a ON a.guid = s.artist_id
             ORDER BY s.start_time",
        )
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(
            |(venue_guid, venue_name, artist_guid, artist_name, artist_image_link, start_time)| {
                ShowListing {
                    venue_guid,
                    venue_name,
                    artist_guid,
                    artist_name,
                    artist_image_link,
                    start_time,
                }
            },
        )
        .collect())
}

/// Book a show between an artist and a venue
///
/// Both referenced rows must exist; the same pair may book again at a
/// different start time, but an exact duplicate booking is rejected.
pub async fn create(pool: &SqlitePool, new: NewShow) -> Result<Show> {
    let result = create_inner(pool, new).await;
    match &result {
        Ok(show) => info!(
            "Show was successfully listed ({}: artist {} at venue {})",
            show.guid, show.artist_id, show.venue_id
        ),
        Err(e) => warn!("Show could not be listed: {}", e),
    }
    result
}

async fn create_inner(pool: &SqlitePool, new: NewShow) -> Result<Show> {
    let mut tx = pool.begin().await?;

    // Referential checks run inside the transaction so the insert sees the
    // same snapshot they did
    let artist_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM artists WHERE guid = ?)")
            .bind(&new.artist_guid)
            .fetch_one(&mut *tx)
            .await?;
    if !artist_exists {
        return Err(Error::Referential(format!(
            "artist {} does not exist",
            new.artist_guid
        )));
    }

    let venue_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM venues WHERE guid = ?)")
            .bind(&new.venue_guid)
            .fetch_one(&mut *tx)
            .await?;
    if !venue_exists {
        return Err(Error::Referential(format!(
            "venue {} does not exist",
            new.venue_guid
        )));
    }

    let guid = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO shows (guid, venue_id, artist_id, start_time) VALUES (?, ?, ?, ?)",
    )
    .bind(&guid)
    .bind(&new.venue_guid)
    .bind(&new.artist_guid)
    .bind(new.start_time)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            Error::Conflict(format!(
                "show for artist {} at venue {} on {} already exists",
                new.artist_guid, new.venue_guid, new.start_time
            ))
        } else {
            Error::Database(e)
        }
    })?;
    tx.commit().await?;

    Ok(Show {
        guid,
        venue_id: new.venue_guid,
        artist_id: new.artist_guid,
        start_time: new.start_time,
    })
}
