//! Database models and API value types
//!
//! Everything crossing the query/mutation boundary is a detached value
//! snapshot - handlers never see live database rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A venue that hosts shows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub guid: String,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// A performer who plays shows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub guid: String,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// A booking linking one artist to one venue at a start time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Show {
    pub guid: String,
    pub venue_id: String,
    pub artist_id: String,
    pub start_time: DateTime<Utc>,
}

/// guid + name pair used by listings and search results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityRef {
    pub guid: String,
    pub name: String,
}

/// Venues sharing a (city, state) location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<EntityRef>,
}

/// Substring search outcome: match count plus guid+name pairs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<EntityRef>,
}

/// One show as seen from the other side of the booking
///
/// On a venue detail page this references the artist; on an artist detail
/// page it references the venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowRef {
    pub guid: String,
    pub name: String,
    pub image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Full venue attributes plus the time-partitioned show lists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    pub past_shows: Vec<ShowRef>,
    pub upcoming_shows: Vec<ShowRef>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Full artist attributes plus the time-partitioned show lists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    pub past_shows: Vec<ShowRef>,
    pub upcoming_shows: Vec<ShowRef>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// One row of the global show listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowListing {
    pub venue_guid: String,
    pub venue_name: String,
    pub artist_guid: String,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Fields for creating a venue
///
/// name, city, state, address, phone, and at least one genre are required;
/// presence is re-checked by the mutation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    #[serde(default)]
    pub image_link: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub facebook_link: Option<String>,
    #[serde(default)]
    pub seeking_talent: bool,
    #[serde(default)]
    pub seeking_description: Option<String>,
}

/// Fields for creating an artist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    #[serde(default)]
    pub image_link: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub facebook_link: Option<String>,
    #[serde(default)]
    pub seeking_venue: bool,
    #[serde(default)]
    pub seeking_description: Option<String>,
}

/// Partial venue update: only supplied fields are applied
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VenueUpdate {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub genres: Option<Vec<String>>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: Option<bool>,
    pub seeking_description: Option<String>,
}

/// Partial artist update: only supplied fields are applied
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtistUpdate {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub genres: Option<Vec<String>>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: Option<bool>,
    pub seeking_description: Option<String>,
}

/// Fields for creating a show
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShow {
    pub artist_guid: String,
    pub venue_guid: String,
    pub start_time: DateTime<Utc>,
}
