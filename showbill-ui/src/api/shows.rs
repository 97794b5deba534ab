//! Show endpoints

use axum::{extract::State, http::StatusCode, Json};
use showbill_common::db::models::{NewShow, Show, ShowListing};
use showbill_common::db::shows;

use super::ApiError;
use crate::AppState;

/// GET /api/shows
///
/// Every show with both sides of the booking, ordered by start time.
pub async fn list_shows(
    State(state): State<AppState>,
) -> Result<Json<Vec<ShowListing>>, ApiError> {
    let listing = shows::list(&state.db).await?;
    Ok(Json(listing))
}

/// POST /api/shows
///
/// Books a show; fails with 422 if either referenced entity is missing and
/// 409 for an exact duplicate booking.
pub async fn create_show(
    State(state): State<AppState>,
    Json(new): Json<NewShow>,
) -> Result<(StatusCode, Json<Show>), ApiError> {
    let show = shows::create(&state.db, new).await?;
    Ok((StatusCode::CREATED, Json(show)))
}
