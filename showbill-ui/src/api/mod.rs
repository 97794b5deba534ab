//! HTTP API handlers for showbill-ui

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use showbill_common::Error;

pub mod artists;
pub mod health;
pub mod shows;
pub mod venues;

pub use artists::{
    artist_detail, create_artist, delete_artist, list_artists, search_artists, update_artist,
};
pub use health::health_routes;
pub use shows::{create_show, list_shows};
pub use venues::{
    create_venue, delete_venue, list_venues, search_venues, update_venue, venue_detail,
};

/// Maps common errors onto HTTP status codes with a JSON error body
///
/// NotFound -> 404, Conflict -> 409, Referential -> 422, everything else
/// is an internal error.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::Referential(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}
