//! Repository for the `cookie_consents` table.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::cookie_consent::{CookieConsent, CreateCookieConsent};

const COLUMNS: &str =
    "id, consent_id, consent_given, categories, consent_date, user_agent, created_at";

pub struct CookieConsentRepo;

impl CookieConsentRepo {
    /// Append a consent decision. Every decision is kept as its own row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCookieConsent,
    ) -> Result<CookieConsent, sqlx::Error> {
        let query = format!(
            "INSERT INTO cookie_consents (consent_id, consent_given, categories, consent_date, user_agent)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CookieConsent>(&query)
            .bind(input.consent_id)
            .bind(input.consent_given)
            .bind(&input.categories)
            .bind(input.consent_date)
            .bind(&input.user_agent)
            .fetch_one(pool)
            .await
    }

    /// Latest decision recorded for a consent id.
    pub async fn find_latest(
        pool: &PgPool,
        consent_id: Uuid,
    ) -> Result<Option<CookieConsent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cookie_consents
             WHERE consent_id = $1
             ORDER BY consent_date DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, CookieConsent>(&query)
            .bind(consent_id)
            .fetch_optional(pool)
            .await
    }
}
