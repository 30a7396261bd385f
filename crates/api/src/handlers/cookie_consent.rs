//! Handler for recording cookie consent decisions.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use coopsite_core::validation::{validate_cookie_consent, CookieConsentRequest};
use coopsite_db::models::cookie_consent::CreateCookieConsent;
use coopsite_db::repositories::CookieConsentRepo;

use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::transform::CookieConsentView;

/// POST /api/v1/cookie-consent
///
/// Append a consent decision. A missing `consentId` is generated and
/// returned so the banner can reuse it for later changes.
pub async fn record_consent(
    State(state): State<AppState>,
    body: Result<Json<CookieConsentRequest>, JsonRejection>,
) -> AppResult<ApiResponse<CookieConsentView>> {
    let Json(body) = body?;
    let valid = validate_cookie_consent(body)?;

    let consent = CookieConsentRepo::create(
        &state.pool,
        &CreateCookieConsent {
            consent_id: valid.consent_id,
            consent_given: valid.consent_given,
            categories: valid.categories,
            consent_date: valid.consent_date,
            user_agent: valid.user_agent,
        },
    )
    .await?;

    tracing::info!(
        consent_id = %consent.consent_id,
        consent_given = consent.consent_given,
        "Cookie consent recorded",
    );

    Ok(ApiResponse::created(CookieConsentView::from(consent)).with_message("Consent recorded"))
}
