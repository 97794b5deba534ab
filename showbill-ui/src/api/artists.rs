//! Artist endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use showbill_common::db::artists;
use showbill_common::db::models::{
    Artist, ArtistDetail, ArtistUpdate, EntityRef, NewArtist, SearchResults,
};

use super::ApiError;
use crate::AppState;

/// Query parameters for name search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Substring to match against artist names; empty matches everything
    #[serde(default)]
    pub term: String,
}

/// GET /api/artists
pub async fn list_artists(
    State(state): State<AppState>,
) -> Result<Json<Vec<EntityRef>>, ApiError> {
    let listing = artists::list(&state.db).await?;
    Ok(Json(listing))
}

/// GET /api/artists/search?term=band
pub async fn search_artists(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResults>, ApiError> {
    let results = artists::search_by_name(&state.db, &query.term).await?;
    Ok(Json(results))
}

/// GET /api/artists/:guid
///
/// Full artist attributes plus past/upcoming show partitions.
pub async fn artist_detail(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> Result<Json<ArtistDetail>, ApiError> {
    let detail = artists::get_detail(&state.db, &guid).await?;
    Ok(Json(detail))
}

/// POST /api/artists
pub async fn create_artist(
    State(state): State<AppState>,
    Json(new): Json<NewArtist>,
) -> Result<(StatusCode, Json<Artist>), ApiError> {
    let artist = artists::create(&state.db, new).await?;
    Ok((StatusCode::CREATED, Json(artist)))
}

/// PATCH /api/artists/:guid
pub async fn update_artist(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(update): Json<ArtistUpdate>,
) -> Result<Json<Artist>, ApiError> {
    let artist = artists::update(&state.db, &guid, update).await?;
    Ok(Json(artist))
}

/// DELETE /api/artists/:guid
///
/// Deletes the artist and its shows; succeeds even if the artist is already
/// gone.
pub async fn delete_artist(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> Result<StatusCode, ApiError> {
    artists::delete(&state.db, &guid).await?;
    Ok(StatusCode::NO_CONTENT)
}
