//! Handler for the downloadable forms listing.

use axum::extract::State;
use coopsite_cache::keys::DOWNLOAD_FORMS_ALL;
use coopsite_cache::Ttl;
use coopsite_db::repositories::DownloadFormRepo;

use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::transform::{views, DownloadFormView};

/// GET /api/v1/download-forms
pub async fn list_forms(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<DownloadFormView>>> {
    let pool = &state.pool;
    let (forms, status) = state
        .cache
        .get_or_load(DOWNLOAD_FORMS_ALL, Ttl::STABLE, move || async move {
            let rows = DownloadFormRepo::list_all(pool).await?;
            Ok::<_, sqlx::Error>(views(rows))
        })
        .await?;

    Ok(ApiResponse::cached(forms, status, Ttl::STABLE))
}
