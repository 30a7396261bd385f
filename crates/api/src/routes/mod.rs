pub mod albums;
pub mod files;
pub mod health;
pub mod news;
pub mod qa;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /organizational                       members by group (GET)
///
/// /news                                 paginated published news (GET)
/// /news/{id}                            one news item (GET)
/// /news/{id}/cover                      inline cover image bytes (GET)
///
/// /albums                               albums with photo counts (GET)
/// /albums/{id}/photos                   photos of one album (GET)
///
/// /download-forms                       downloadable forms (GET)
///
/// /qa                                   answered questions (GET), submit (POST)
///
/// /elections/lookup?member_no=          voter lookup (GET)
///
/// /cookie-consent                       record consent (POST)
///
/// /cache/invalidate                     drop a cache namespace (POST, token)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/organizational",
            get(handlers::organizational::list_members),
        )
        .nest("/news", news::router())
        .nest("/albums", albums::router())
        .route(
            "/download-forms",
            get(handlers::download_forms::list_forms),
        )
        .nest("/qa", qa::router())
        .route(
            "/elections/lookup",
            get(handlers::elections::lookup_voter),
        )
        .route(
            "/cookie-consent",
            post(handlers::cookie_consent::record_consent),
        )
        .route("/cache/invalidate", post(handlers::cache::invalidate))
}
