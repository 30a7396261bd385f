//! Handlers for published news.

use axum::body::Body;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use coopsite_cache::keys::{news_item, news_page};
use coopsite_cache::Ttl;
use coopsite_core::error::CoreError;
use coopsite_core::media::{decode_inline_image, is_inline_base64};
use coopsite_core::types::DbId;
use coopsite_db::repositories::NewsRepo;

use crate::error::{AppError, AppResult};
use crate::query::PageParams;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::transform::{views, NewsDetailView, NewsPage, NewsSummaryView};

/// `Cache-Control` for decoded cover images.
const COVER_CACHE_CONTROL: &str = "public, max-age=86400";

/// GET /api/v1/news?page=&per_page=
///
/// One page of published news, newest first, with pagination fields on the
/// envelope. `page` and `per_page` are clamped rather than rejected.
pub async fn list_news(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> AppResult<ApiResponse<Vec<NewsSummaryView>>> {
    let Query(params) = params?;
    let request = params.to_request();
    let key = news_page(request.page, request.per_page);

    let pool = &state.pool;
    let (page, status) = state
        .cache
        .get_or_load(&key, Ttl::VOLATILE, move || async move {
            let total = NewsRepo::count_published(pool).await?;
            let rows = NewsRepo::list_published(pool, request.limit(), request.offset()).await?;
            Ok::<_, sqlx::Error>(NewsPage {
                items: views(rows),
                meta: request.meta(total),
            })
        })
        .await?;

    Ok(ApiResponse::cached(page.items, status, Ttl::VOLATILE).with_pagination(page.meta))
}

/// GET /api/v1/news/{id}
pub async fn get_news(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<ApiResponse<NewsDetailView>> {
    let Path(id) = id?;
    let key = news_item(id);

    let pool = &state.pool;
    let (item, status) = state
        .cache
        .get_or_load(&key, Ttl::VOLATILE, move || async move {
            NewsRepo::find_published(pool, id)
                .await?
                .map(NewsDetailView::from)
                .ok_or_else(|| AppError::Core(CoreError::not_found("NewsItem", id)))
        })
        .await?;

    Ok(ApiResponse::cached(item, status, Ttl::VOLATILE))
}

/// GET /api/v1/news/{id}/cover
///
/// Decoded bytes of a cover image stored inline as base64. Covers stored as
/// file paths are served by the `/News/File` route instead, so they 404 here.
pub async fn get_cover(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<Response> {
    let Path(id) = id?;

    let cover = NewsRepo::find_cover(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("NewsItem", id))?;

    let raw = match cover {
        Some(raw) if is_inline_base64(&raw) => raw,
        _ => return Err(CoreError::not_found("NewsCover", id).into()),
    };

    let image = decode_inline_image(&raw).map_err(|e| {
        tracing::warn!(news_id = id, error = %e, "Stored cover image does not decode");
        CoreError::not_found("NewsCover", id)
    })?;

    let length = image.bytes.len();
    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, image.content_type),
            (CONTENT_LENGTH, length.to_string()),
            (CACHE_CONTROL, COVER_CACHE_CONTROL.to_string()),
        ],
        Body::from(image.bytes),
    )
        .into_response())
}
