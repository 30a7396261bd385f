//! Handlers for photo albums.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use coopsite_cache::keys::{album_photos, ALBUMS_LIST};
use coopsite_cache::Ttl;
use coopsite_core::error::CoreError;
use coopsite_core::types::DbId;
use coopsite_db::repositories::AlbumRepo;

use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::transform::{views, AlbumView, PhotoView};

/// GET /api/v1/albums
///
/// Albums with their photo counts, most recent event first.
pub async fn list_albums(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<AlbumView>>> {
    let pool = &state.pool;
    let (albums, status) = state
        .cache
        .get_or_load(ALBUMS_LIST, Ttl::MODERATE, move || async move {
            let rows = AlbumRepo::list(pool).await?;
            Ok::<_, sqlx::Error>(views(rows))
        })
        .await?;

    Ok(ApiResponse::cached(albums, status, Ttl::MODERATE))
}

/// GET /api/v1/albums/{id}/photos
///
/// Photos of one album in display order. 404 if the album does not exist;
/// nothing is cached in that case.
pub async fn list_photos(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<ApiResponse<Vec<PhotoView>>> {
    let Path(id) = id?;
    let key = album_photos(id);

    let pool = &state.pool;
    let (photos, status) = state
        .cache
        .get_or_load(&key, Ttl::MODERATE, move || async move {
            if AlbumRepo::find_by_id(pool, id).await?.is_none() {
                return Err(AppError::Core(CoreError::not_found("PhotoAlbum", id)));
            }
            let rows = AlbumRepo::list_photos(pool, id).await?;
            Ok(views(rows))
        })
        .await?;

    Ok(ApiResponse::cached(photos, status, Ttl::MODERATE))
}
