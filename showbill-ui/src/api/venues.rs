//! Venue endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use showbill_common::db::models::{
    CityGroup, NewVenue, SearchResults, Venue, VenueDetail, VenueUpdate,
};
use showbill_common::db::venues;

use super::ApiError;
use crate::AppState;

/// Query parameters for name search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Substring to match against venue names; empty matches everything
    #[serde(default)]
    pub term: String,
}

/// GET /api/venues
///
/// All venues grouped by (city, state).
pub async fn list_venues(
    State(state): State<AppState>,
) -> Result<Json<Vec<CityGroup>>, ApiError> {
    let groups = venues::list_grouped_by_location(&state.db).await?;
    Ok(Json(groups))
}

/// GET /api/venues/search?term=hop
pub async fn search_venues(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResults>, ApiError> {
    let results = venues::search_by_name(&state.db, &query.term).await?;
    Ok(Json(results))
}

/// GET /api/venues/:guid
///
/// Full venue attributes plus past/upcoming show partitions.
pub async fn venue_detail(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> Result<Json<VenueDetail>, ApiError> {
    let detail = venues::get_detail(&state.db, &guid).await?;
    Ok(Json(detail))
}

/// POST /api/venues
pub async fn create_venue(
    State(state): State<AppState>,
    Json(new): Json<NewVenue>,
) -> Result<(StatusCode, Json<Venue>), ApiError> {
    let venue = venues::create(&state.db, new).await?;
    Ok((StatusCode::CREATED, Json(venue)))
}

/// PATCH /api/venues/:guid
pub async fn update_venue(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(update): Json<VenueUpdate>,
) -> Result<Json<Venue>, ApiError> {
    let venue = venues::update(&state.db, &guid, update).await?;
    Ok(Json(venue))
}

/// DELETE /api/venues/:guid
///
/// Deletes the venue and its shows; succeeds even if the venue is already
/// gone.
pub async fn delete_venue(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> Result<StatusCode, ApiError> {
    venues::delete(&state.db, &guid).await?;
    Ok(StatusCode::NO_CONTENT)
}
