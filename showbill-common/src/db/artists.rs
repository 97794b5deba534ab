//! Artist queries and mutations

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::models::{
    Artist, ArtistDetail, ArtistUpdate, EntityRef, NewArtist, SearchResults, ShowRef,
};
use crate::db::{
    decode_genres, encode_genres, is_unique_violation, require_field, substring_pattern,
};
use crate::{Error, Result};

type ArtistRow = (
    String,         // guid
    String,         // name
    String,         // city
    String,         // state
    String,         // phone
    String,         // genres (JSON)
    Option<String>, // image_link
    Option<String>, // website
    Option<String>, // facebook_link
    i64,            // seeking_venue
    Option<String>, // seeking_description
);

const ARTIST_COLUMNS: &str = "guid, name, city, state, phone, genres, \
     image_link, website, facebook_link, seeking_venue, seeking_description";

fn artist_from_row(row: ArtistRow) -> Result<Artist> {
    Ok(Artist {
        guid: row.0,
        name: row.1,
        city: row.2,
        state: row.3,
        phone: row.4,
        genres: decode_genres(&row.5)?,
        image_link: row.6,
        website: row.7,
        facebook_link: row.8,
        seeking_venue: row.9 != 0,
        seeking_description: row.10,
    })
}

/// List all artists as guid+name pairs, ordered by name
pub async fn list(pool: &SqlitePool) -> Result<Vec<EntityRef>> {
    let rows: Vec<(String, String)> =
        sqlx::query_as("SELECT guid, name FROM artists ORDER BY name")
            .fetch_all(pool)
            .await?;

    Ok(rows
        .into_iter()
        .map(|(guid, name)| EntityRef { guid, name })
        .collect())
}

/// Case-insensitive substring search on artist name
pub async fn search_by_name(pool: &SqlitePool, term: &str) -> Result<SearchResults> {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT guid, name FROM artists WHERE name LIKE ? ESCAPE '\\' ORDER BY name",
    )
    .bind(substring_pattern(term))
    .fetch_all(pool)
    .await?;

    let data: Vec<EntityRef> = rows
        .into_iter()
        .map(|(guid, name)| EntityRef { guid, name })
        .collect();

    Ok(SearchResults {
        count: data.len(),
        data,
    })
}

/// Fetch full artist attributes plus past/upcoming show partitions
///
/// Each show entry carries the venue side of the booking. Uses the same
/// chronological partition rule as the venue detail, so a given show lands
/// on the same side of the split in both views.
pub async fn get_detail(pool: &SqlitePool, guid: &str) -> Result<ArtistDetail> {
    let query = format!("SELECT {ARTIST_COLUMNS} FROM artists WHERE guid = ?");
    let row: Option<ArtistRow> = sqlx::query_as(&query)
        .bind(guid)
        .fetch_optional(pool)
        .await?;
    let artist = artist_from_row(row.ok_or_else(|| Error::NotFound(format!("artist {guid}")))?)?;

    let shows: Vec<(String, String, Option<String>, DateTime<Utc>)> = sqlx::query_as(
        "SELECT s.venue_id, v.name, v.image_link, s.start_time
         FROM shows s
         JOIN venues v ON v.guid = s.venue_id
         WHERE s.artist_id = ?
         ORDER BY s.start_time",
    )
    .bind(guid)
    .fetch_all(pool)
    .await?;

    let now = Utc::now();
    let mut past_shows = Vec::new();
    let mut upcoming_shows = Vec::new();
    for (venue_guid, venue_name, image_link, start_time) in shows {
        let entry = ShowRef {
            guid: venue_guid,
            name: venue_name,
            image_link,
            start_time,
        };
        if start_time < now {
            past_shows.push(entry);
        } else {
            upcoming_shows.push(entry);
        }
    }

    Ok(ArtistDetail {
        artist,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    })
}

/// Create an artist, reporting exactly one outcome message
pub async fn create(pool: &SqlitePool, new: NewArtist) -> Result<Artist> {
    let name = new.name.clone();
    let result = create_inner(pool, new).await;
    match &result {
        Ok(artist) => info!("Artist '{}' was successfully listed ({})", artist.name, artist.guid),
        Err(e) => warn!("Artist '{}' could not be listed: {}", name, e),
    }
    result
}

async fn create_inner(pool: &SqlitePool, new: NewArtist) -> Result<Artist> {
    require_field("name", &new.name)?;
    require_field("city", &new.city)?;
    require_field("state", &new.state)?;
    require_field("phone", &new.phone)?;
    if new.genres.is_empty() {
        return Err(Error::Conflict("missing required field: genres".to_string()));
    }

    let guid = Uuid::new_v4().to_string();
    let genres = encode_genres(&new.genres)?;

    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO artists (guid, name, city, state, phone, genres,
             image_link, website, facebook_link, seeking_venue, seeking_description)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&guid)
    .bind(&new.name)
    .bind(&new.city)
    .bind(&new.state)
    .bind(&new.phone)
    .bind(&genres)
    .bind(&new.image_link)
    .bind(&new.website)
    .bind(&new.facebook_link)
    .bind(new.seeking_venue as i64)
    .bind(&new.seeking_description)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            Error::Conflict(format!("artist name '{}' already exists", new.name))
        } else {
            Error::Database(e)
        }
    })?;
    tx.commit().await?;

    Ok(Artist {
        guid,
        name: new.name,
        city: new.city,
        state: new.state,
        phone: new.phone,
        genres: new.genres,
        image_link: new.image_link,
        website: new.website,
        facebook_link: new.facebook_link,
        seeking_venue: new.seeking_venue,
        seeking_description: new.seeking_description,
    })
}

/// Apply the supplied fields to an existing artist
pub async fn update(pool: &SqlitePool, guid: &str, update: ArtistUpdate) -> Result<Artist> {
    let result = update_inner(pool, guid, update).await;
    match &result {
        Ok(artist) => info!("Artist '{}' was successfully updated ({})", artist.name, artist.guid),
        Err(e) => warn!("Artist {} could not be updated: {}", guid, e),
    }
    result
}

async fn update_inner(pool: &SqlitePool, guid: &str, update: ArtistUpdate) -> Result<Artist> {
    let mut tx = pool.begin().await?;

    let query = format!("SELECT {ARTIST_COLUMNS} FROM artists WHERE guid = ?");
    let row: Option<ArtistRow> = sqlx::query_as(&query)
        .bind(guid)
        .fetch_optional(&mut *tx)
        .await?;
    let mut artist =
        artist_from_row(row.ok_or_else(|| Error::NotFound(format!("artist {guid}")))?)?;

    if let Some(name) = update.name {
        require_field("name", &name)?;
        artist.name = name;
    }
    if let Some(city) = update.city {
        require_field("city", &city)?;
        artist.city = city;
    }
    if let Some(state) = update.state {
        require_field("state", &state)?;
        artist.state = state;
    }
    if let Some(phone) = update.phone {
        require_field("phone", &phone)?;
        artist.phone = phone;
    }
    if let Some(genres) = update.genres {
        if genres.is_empty() {
            return Err(Error::Conflict("missing required field: genres".to_string()));
        }
        artist.genres = genres;
    }
    if let Some(image_link) = update.image_link {
        artist.image_link = Some(image_link);
    }
    if let Some(website) = update.website {
        artist.website = Some(website);
    }
    if let Some(facebook_link) = update.facebook_link {
        artist.facebook_link = Some(facebook_link);
    }
    if let Some(seeking_venue) = update.seeking_venue {
        artist.seeking_venue = seeking_venue;
    }
    if let Some(seeking_description) = update.seeking_description {
        artist.seeking_description = Some(seeking_description);
    }

    let genres = encode_genres(&artist.genres)?;
    sqlx::query(
        "UPDATE artists SET name = ?, city = ?, state = ?, phone = ?, genres = ?,
             image_link = ?, website = ?, facebook_link = ?,
             seeking_venue = ?, seeking_description = ?,
             updated_at = CURRENT_TIMESTAMP
         WHERE guid = ?",
    )
    .bind(&artist.name)
    .bind(&artist.city)
    .bind(&artist.state)
    .bind(&artist.phone)
    .bind(&genres)
    .bind(&artist.image_link)
    .bind(&artist.website)
    .bind(&artist.facebook_link)
    .bind(artist.seeking_venue as i64)
    .bind(&artist.seeking_description)
    .bind(guid)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            Error::Conflict(format!("artist name '{}' already exists", artist.name))
        } else {
            Error::Database(e)
        }
    })?;
    tx.commit().await?;

    Ok(artist)
}

/// Delete an artist and all shows referencing it, as one atomic operation
///
/// Symmetric with the venue delete: cascades to shows and is an idempotent
/// no-op for a guid with no matching row.
pub async fn delete(pool: &SqlitePool, guid: &str) -> Result<()> {
    let result = delete_inner(pool, guid).await;
    match &result {
        Ok(removed) if *removed => info!("Artist {} and its shows were deleted", guid),
        Ok(_) => info!("Artist {} was already absent, nothing to delete", guid),
        Err(e) => warn!("Artist {} could not be deleted: {}", guid, e),
    }
    result.map(|_| ())
}

async fn delete_inner(pool: &SqlitePool, guid: &str) -> Result<bool> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM shows WHERE artist_id = ?")
        .bind(guid)
        .execute(&mut *tx)
        .await?;
    let deleted = sqlx::query("DELETE FROM artists WHERE guid = ?")
        .bind(guid)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(deleted.rows_affected() > 0)
}
