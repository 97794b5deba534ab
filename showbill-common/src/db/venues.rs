//! Venue queries and mutations

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::models::{
    CityGroup, EntityRef, NewVenue, SearchResults, ShowRef, Venue, VenueDetail, VenueUpdate,
};
use crate::db::{
    decode_genres, encode_genres, is_unique_violation, require_field, substring_pattern,
};
use crate::{Error, Result};

type VenueRow = (
    String,         // guid
    String,         // name
    String,         // city
    String,         // state
    String,         // address
    String,         // phone
    String,         // genres (JSON)
    Option<String>, // image_link
    Option<String>, // website
    Option<String>, // facebook_link
    i64,            // seeking_talent
    Option<String>, // seeking_description
);

const VENUE_COLUMNS: &str = "guid, name, city, state, address, phone, genres, \
     image_link, website, facebook_link, seeking_talent, seeking_description";

fn venue_from_row(row: VenueRow) -> Result<Venue> {
    Ok(Venue {
        guid: row.0,
        name: row.1,
        city: row.2,
        state: row.3,
        address: row.4,
        phone: row.5,
        genres: decode_genres(&row.6)?,
        image_link: row.7,
        website: row.8,
        facebook_link: row.9,
        seeking_talent: row.10 != 0,
        seeking_description: row.11,
    })
}

/// List all venues grouped by (city, state)
///
/// Groups and members are ordered by name so the listing is deterministic.
pub async fn list_grouped_by_location(pool: &SqlitePool) -> Result<Vec<CityGroup>> {
    let rows: Vec<(String, String, String, String)> = sqlx::query_as(
        "SELECT city, state, guid, name FROM venues ORDER BY city, state, name",
    )
    .fetch_all(pool)
    .await?;

    let mut groups: Vec<CityGroup> = Vec::new();
    for (city, state, guid, name) in rows {
        match groups.last_mut() {
            Some(group) if group.city == city && group.state == state => {
                group.venues.push(EntityRef { guid, name });
            }
            _ => groups.push(CityGroup {
                city,
                state,
                venues: vec![EntityRef { guid, name }],
            }),
        }
    }

    Ok(groups)
}

/// Case-insensitive substring search on venue name
///
/// An empty term matches every venue.
pub async fn search_by_name(pool: &SqlitePool, term: &str) -> Result<SearchResults> {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT guid, name FROM venues WHERE name LIKE ? ESCAPE '\\' ORDER BY name",
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

/// Fetch full venue attributes plus past/upcoming show partitions
///
/// Each show entry carries the artist side of the booking. Partitioning is a
/// chronological comparison against the current time: strictly before now is
/// past, everything else upcoming.
pub async fn get_detail(pool: &SqlitePool, guid: &str) -> Result<VenueDetail> {
    let query = format!("SELECT {VENUE_COLUMNS} FROM venues WHERE guid = ?");
    let row: Option<VenueRow> = sqlx::query_as(&query)
        .bind(guid)
        .fetch_optional(pool)
        .await?;
    let venue = venue_from_row(row.ok_or_else(|| Error::NotFound(format!("venue {guid}")))?)?;

    let shows: Vec<(String, String, Option<String>, DateTime<Utc>)> = sqlx::query_as(
        "SELECT s.artist_id, a.name, a.image_link, s.start_time
         FROM shows s
         JOIN artists a ON a.guid = s.artist_id
         WHERE s.venue_id = ?
         ORDER BY s.start_time",
    )
    .bind(guid)
    .fetch_all(pool)
    .await?;

    let now = Utc::now();
    let mut past_shows = Vec::new();
    let mut upcoming_shows = Vec::new();
    for (artist_guid, artist_name, image_link, start_time) in shows {
        let entry = ShowRef {
            guid: artist_guid,
            name: artist_name,
            image_link,
            start_time,
        };
        if start_time < now {
            past_shows.push(entry);
        } else {
            upcoming_shows.push(entry);
        }
    }

    Ok(VenueDetail {
        venue,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    })
}

/// Create a venue, reporting exactly one outcome message
pub async fn create(pool: &SqlitePool, new: NewVenue) -> Result<Venue> {
    let name = new.name.clone();
    let result = create_inner(pool, new).await;
    match &result {
        Ok(venue) => info!("Venue '{}' was successfully listed ({})", venue.name, venue.guid),
        Err(e) => warn!("Venue '{}' could not be listed: {}", name, e),
    }
    result
}

async fn create_inner(pool: &SqlitePool, new: NewVenue) -> Result<Venue> {
    require_field("name", &new.name)?;
    require_field("city", &new.city)?;
    require_field("state", &new.state)?;
    require_field("address", &new.address)?;
    require_field("phone", &new.phone)?;
    if new.genres.is_empty() {
        return Err(Error::Conflict("missing required field: genres".to_string()));
    }

    let guid = Uuid::new_v4().to_string();
    let genres = encode_genres(&new.genres)?;

    // Dropping the transaction uncommitted rolls the attempt back
    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO venues (guid, name, city, state, address, phone, genres,
             image_link, website, facebook_link, seeking_talent, seeking_description)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&guid)
    .bind(&new.name)
    .bind(&new.city)
    .bind(&new.state)
    .bind(&new.address)
    .bind(&new.phone)
    .bind(&genres)
    .bind(&new.image_link)
    .bind(&new.website)
    .bind(&new.facebook_link)
    .bind(new.seeking_talent as i64)
    .bind(&new.seeking_description)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            Error::Conflict(format!("venue name '{}' already exists", new.name))
        } else {
            Error::Database(e)
        }
    })?;
    tx.commit().await?;

    Ok(Venue {
        guid,
        name: new.name,
        city: new.city,
        state: new.state,
        address: new.address,
        phone: new.phone,
        genres: new.genres,
        image_link: new.image_link,
        website: new.website,
        facebook_link: new.facebook_link,
        seeking_talent: new.seeking_talent,
        seeking_description: new.seeking_description,
    })
}

/// Apply the supplied fields to an existing venue
pub async fn update(pool: &SqlitePool, guid: &str, update: VenueUpdate) -> Result<Venue> {
    let result = update_inner(pool, guid, update).await;
    match &result {
        Ok(venue) => info!("Venue '{}' was successfully updated ({})", venue.name, venue.guid),
        Err(e) => warn!("Venue {} could not be updated: {}", guid, e),
    }
    result
}

async fn update_inner(pool: &SqlitePool, guid: &str, update: VenueUpdate) -> Result<Venue> {
    let mut tx = pool.begin().await?;

    let query = format!("SELECT {VENUE_COLUMNS} FROM venues WHERE guid = ?");
    let row: Option<VenueRow> = sqlx::query_as(&query)
        .bind(guid)
        .fetch_optional(&mut *tx)
        .await?;
    let mut venue = venue_from_row(row.ok_or_else(|| Error::NotFound(format!("venue {guid}")))?)?;

    if let Some(name) = update.name {
        require_field("name", &name)?;
        venue.name = name;
    }
    if let Some(city) = update.city {
        require_field("city", &city)?;
        venue.city = city;
    }
    if let Some(state) = update.state {
        require_field("state", &state)?;
        venue.state = state;
    }
    if let Some(address) = update.address {
        require_field("address", &address)?;
        venue.address = address;
    }
    if let Some(phone) = update.phone {
        require_field("phone", &phone)?;
        venue.phone = phone;
    }
    if let Some(genres) = update.genres {
        if genres.is_empty() {
            return Err(Error::Conflict("missing required field: genres".to_string()));
        }
        venue.genres = genres;
    }
    if let Some(image_link) = update.image_link {
        venue.image_link = Some(image_link);
    }
    if let Some(website) = update.website {
        venue.website = Some(website);
    }
    if let Some(facebook_link) = update.facebook_link {
        venue.facebook_link = Some(facebook_link);
    }
    if let Some(seeking_talent) = update.seeking_talent {
        venue.seeking_talent = seeking_talent;
    }
    if let Some(seeking_description) = update.seeking_description {
        venue.seeking_description = Some(seeking_description);
    }

    let genres = encode_genres(&venue.genres)?;
    sqlx::query(
        "UPDATE venues SET name = ?, city = ?, state = ?, address = ?, phone = ?,
             genres = ?, image_link = ?, website = ?, facebook_link = ?,
             seeking_talent = ?, seeking_description = ?,
             updated_at = CURRENT_TIMESTAMP
         WHERE guid = ?",
    )
    .bind(&venue.name)
    .bind(&venue.city)
    .bind(&venue.state)
    .bind(&venue.address)
    .bind(&venue.phone)
    .bind(&genres)
    .bind(&venue.image_link)
    .bind(&venue.website)
    .bind(&venue.facebook_link)
    .bind(venue.seeking_talent as i64)
    .bind(&venue.seeking_description)
    .bind(guid)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            Error::Conflict(format!("venue name '{}' already exists", venue.name))
        } else {
            Error::Database(e)
        }
    })?;
    tx.commit().await?;

    Ok(venue)
}

/// Delete a venue and all shows referencing it, as one atomic operation
///
/// Deleting a guid with no matching row is a successful no-op.
pub async fn delete(pool: &SqlitePool, guid: &str) -> Result<()> {
    let result = delete_inner(pool, guid).await;
    match &result {
        Ok(removed) if *removed => info!("Venue {} and its shows were deleted", guid),
        Ok(_) => info!("Venue {} was already absent, nothing to delete", guid),
        Err(e) => warn!("Venue {} could not be deleted: {}", guid, e),
    }
    result.map(|_| ())
}

async fn delete_inner(pool: &SqlitePool, guid: &str) -> Result<bool> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM shows WHERE venue_id = ?")
        .bind(guid)
        .execute(&mut *tx)
        .await?;
    let deleted = sqlx::query("DELETE FROM venues WHERE guid = ?")
        .bind(guid)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(deleted.rows_affected() > 0)
}
