//! Cookie consent record model.

use coopsite_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `cookie_consents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CookieConsent {
    pub id: DbId,
    pub consent_id: Uuid,
    pub consent_given: bool,
    pub categories: serde_json::Value,
    pub consent_date: Timestamp,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for recording a consent decision.
#[derive(Debug, Clone)]
pub struct CreateCookieConsent {
    pub consent_id: Uuid,
    pub consent_given: bool,
    pub categories: serde_json::Value,
    pub consent_date: Timestamp,
    pub user_agent: Option<String>,
}
