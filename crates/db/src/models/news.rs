//! News item models.

use coopsite_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A full row from the `news_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NewsItem {
    pub id: DbId,
    pub title: String,
    pub summary: Option<String>,
    pub body: Option<String>,
    /// A stored path, or inline base64 image data for legacy rows.
    pub cover_image: Option<String>,
    pub published_at: Timestamp,
}

/// List projection of a news item (no body).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NewsSummary {
    pub id: DbId,
    pub title: String,
    pub summary: Option<String>,
    pub cover_image: Option<String>,
    pub published_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateNewsItem {
    pub title: String,
    pub summary: Option<String>,
    pub body: Option<String>,
    pub cover_image: Option<String>,
    pub is_published: bool,
    pub published_at: Option<Timestamp>,
}
