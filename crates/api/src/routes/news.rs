//! Route definitions for published news.

use axum::routing::get;
use axum::Router;

use crate::handlers::news;
use crate::state::AppState;

/// News routes mounted at `/news`.
///
/// ```text
/// GET /             -> list_news
/// GET /{id}         -> get_news
/// GET /{id}/cover   -> get_cover
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(news::list_news))
        .route("/{id}", get(news::get_news))
        .route("/{id}/cover", get(news::get_cover))
}
