//! Handler for the election roll lookup.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use coopsite_core::error::CoreError;
use coopsite_core::validation::validate_member_no;
use coopsite_db::repositories::ElectionRepo;

use crate::error::AppResult;
use crate::query::MemberLookupParams;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::transform::ElectionVoterView;

/// GET /api/v1/elections/lookup?member_no=
///
/// Polling information for one member. Not cached: lookups are keyed by
/// personal identifiers and rarely repeat.
pub async fn lookup_voter(
    State(state): State<AppState>,
    params: Result<Query<MemberLookupParams>, QueryRejection>,
) -> AppResult<ApiResponse<ElectionVoterView>> {
    let Query(params) = params?;
    let member_no = validate_member_no(params.member_no.as_deref())?;

    let voter = ElectionRepo::find_by_member_no(&state.pool, &member_no)
        .await?
        .ok_or_else(|| CoreError::not_found("ElectionVoter", &member_no))?;

    Ok(ApiResponse::ok(ElectionVoterView::from(voter)))
}
