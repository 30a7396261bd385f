//! Repository for `photo_albums` and `album_photos`.

use coopsite_core::types::DbId;
use sqlx::PgPool;

use crate::models::album::{AlbumPhoto, CreateAlbumPhoto, CreatePhotoAlbum, PhotoAlbum};

const ALBUM_COLUMNS: &str = "a.id, a.title, a.description, a.cover_path, a.event_date, \
     (SELECT COUNT(*) FROM album_photos p WHERE p.album_id = a.id) AS photo_count";

const PHOTO_COLUMNS: &str = "id, album_id, file_path, caption, sort_order";

pub struct AlbumRepo;

impl AlbumRepo {
    /// All albums, most recent event first.
    pub async fn list(pool: &PgPool) -> Result<Vec<PhotoAlbum>, sqlx::Error> {
        let query = format!(
            "SELECT {ALBUM_COLUMNS} FROM photo_albums a
             ORDER BY a.event_date DESC NULLS LAST, a.id DESC"
        );
        sqlx::query_as::<_, PhotoAlbum>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PhotoAlbum>, sqlx::Error> {
        let query = format!("SELECT {ALBUM_COLUMNS} FROM photo_albums a WHERE a.id = $1");
        sqlx::query_as::<_, PhotoAlbum>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Photos of an album in display order.
    pub async fn list_photos(pool: &PgPool, album_id: DbId) -> Result<Vec<AlbumPhoto>, sqlx::Error> {
        let query = format!(
            "SELECT {PHOTO_COLUMNS} FROM album_photos
             WHERE album_id = $1
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, AlbumPhoto>(&query)
            .bind(album_id)
            .fetch_all(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreatePhotoAlbum) -> Result<PhotoAlbum, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO photo_albums (title, description, cover_path, event_date)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.cover_path)
        .bind(input.event_date)
        .fetch_one(pool)
        .await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn add_photo(pool: &PgPool, input: &CreateAlbumPhoto) -> Result<AlbumPhoto, sqlx::Error> {
        let query = format!(
            "INSERT INTO album_photos (album_id, file_path, caption, sort_order)
             VALUES ($1, $2, $3, $4)
             RETURNING {PHOTO_COLUMNS}"
        );
        sqlx::query_as::<_, AlbumPhoto>(&query)
            .bind(input.album_id)
            .bind(&input.file_path)
            .bind(&input.caption)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }
}
