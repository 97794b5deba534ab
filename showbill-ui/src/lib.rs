//! showbill-ui library - booking directory HTTP service
//!
//! JSON API over the venue/artist/show directory. Presentation is left to
//! whatever front end consumes the JSON; this service only hands out
//! detached value snapshots.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route(
            "/api/venues",
            get(api::list_venues).post(api::create_venue),
        )
        .route("/api/venues/search", get(api::search_venues))
        .route(
            "/api/venues/:guid",
            get(api::venue_detail)
                .patch(api::update_venue)
                .delete(api::delete_venue),
        )
        .route(
            "/api/artists",
            get(api::list_artists).post(api::create_artist),
        )
        .route("/api/artists/search", get(api::search_artists))
        .route(
            "/api/artists/:guid",
            get(api::artist_detail)
                .patch(api::update_artist)
                .delete(api::delete_artist),
        )
        .route("/api/shows", get(api::list_shows).post(api::create_show))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
