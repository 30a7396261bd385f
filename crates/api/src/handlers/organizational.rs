//! Handler for the organizational chart.

use axum::extract::State;
use coopsite_cache::keys::ORGANIZATIONAL_ALL;
use coopsite_cache::Ttl;
use coopsite_db::repositories::OrganizationalRepo;

use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::transform::{views, OrganizationalMemberView};

/// GET /api/v1/organizational
///
/// All active members, ordered by group and then sort order.
pub async fn list_members(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<OrganizationalMemberView>>> {
    let pool = &state.pool;
    let (members, status) = state
        .cache
        .get_or_load(ORGANIZATIONAL_ALL, Ttl::STABLE, move || async move {
            let rows = OrganizationalRepo::list_all(pool).await?;
            Ok::<_, sqlx::Error>(views(rows))
        })
        .await?;

    Ok(ApiResponse::cached(members, status, Ttl::STABLE))
}
