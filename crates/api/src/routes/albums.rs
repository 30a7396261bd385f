//! Route definitions for photo albums.

use axum::routing::get;
use axum::Router;

use crate::handlers::albums;
use crate::state::AppState;

/// Album routes mounted at `/albums`.
///
/// ```text
/// GET /              -> list_albums
/// GET /{id}/photos   -> list_photos
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(albums::list_albums))
        .route("/{id}/photos", get(albums::list_photos))
}
