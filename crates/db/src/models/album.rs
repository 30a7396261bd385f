//! Photo album and album photo models.

use chrono::NaiveDate;
use coopsite_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from `photo_albums` joined with its photo count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PhotoAlbum {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub cover_path: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub photo_count: i64,
}

/// A row from the `album_photos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AlbumPhoto {
    pub id: DbId,
    pub album_id: DbId,
    pub file_path: Option<String>,
    pub caption: Option<String>,
    pub sort_order: i32,
}

#[derive(Debug, Clone)]
pub struct CreatePhotoAlbum {
    pub title: String,
    pub description: Option<String>,
    pub cover_path: Option<String>,
    pub event_date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct CreateAlbumPhoto {
    pub album_id: DbId,
    pub file_path: Option<String>,
    pub caption: Option<String>,
    pub sort_order: i32,
}
