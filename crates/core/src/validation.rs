//! Input validation for the public write and lookup endpoints.
//!
//! Request bodies are deserialized with every field optional so that a
//! missing field surfaces as a field-level [`CoreError::InvalidField`]
//! naming the field, instead of an opaque deserialization failure.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Maximum length of a Q&A asker name (characters).
pub const MAX_ASKER_NAME_LEN: usize = 100;

/// Maximum length of a Q&A question body (characters).
pub const MAX_QUESTION_LEN: usize = 2000;

/// Maximum length of a member number.
pub const MAX_MEMBER_NO_LEN: usize = 20;

/// Maximum stored user agent length; longer values are truncated.
pub const MAX_USER_AGENT_LEN: usize = 512;

// ---------------------------------------------------------------------------
// Cookie consent
// ---------------------------------------------------------------------------

/// Raw cookie-consent body as posted by the consent banner.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieConsentRequest {
    pub consent_id: Option<String>,
    pub consent_given: Option<bool>,
    pub consent_date: Option<String>,
    pub categories: Option<serde_json::Value>,
    pub user_agent: Option<String>,
}

/// A cookie consent that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidCookieConsent {
    pub consent_id: Uuid,
    pub consent_given: bool,
    pub consent_date: Timestamp,
    pub categories: serde_json::Value,
    pub user_agent: Option<String>,
}

/// Validate a cookie-consent body.
///
/// `consentDate` (RFC 3339) and `consentGiven` are required. A missing
/// `consentId` is generated; `categories` must be a JSON object when given.
pub fn validate_cookie_consent(
    request: CookieConsentRequest,
) -> Result<ValidCookieConsent, CoreError> {
    let raw_date = request
        .consent_date
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CoreError::invalid_field("consentDate", "consentDate is required"))?;
    let consent_date = DateTime::parse_from_rfc3339(raw_date)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|_| {
            CoreError::invalid_field("consentDate", "consentDate must be an RFC 3339 timestamp")
        })?;

    let consent_given = request
        .consent_given
        .ok_or_else(|| CoreError::invalid_field("consentGiven", "consentGiven is required"))?;

    let consent_id = match request.consent_id.as_deref().map(str::trim) {
        None | Some("") => Uuid::new_v4(),
        Some(raw) => Uuid::parse_str(raw)
            .map_err(|_| CoreError::invalid_field("consentId", "consentId must be a UUID"))?,
    };

    let categories = match request.categories {
        None | Some(serde_json::Value::Null) => serde_json::json!({}),
        Some(value @ serde_json::Value::Object(_)) => value,
        Some(_) => {
            return Err(CoreError::invalid_field(
                "categories",
                "categories must be an object",
            ))
        }
    };

    let user_agent = request
        .user_agent
        .map(|ua| ua.trim().chars().take(MAX_USER_AGENT_LEN).collect::<String>())
        .filter(|ua| !ua.is_empty());

    Ok(ValidCookieConsent {
        consent_id,
        consent_given,
        consent_date,
        categories,
        user_agent,
    })
}

// ---------------------------------------------------------------------------
// Q&A submissions
// ---------------------------------------------------------------------------

/// Raw question submission from the Q&A form.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest {
    pub asker_name: Option<String>,
    pub question: Option<String>,
}

/// A question submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidQuestion {
    pub asker_name: String,
    pub question: String,
}

pub fn validate_question(request: QuestionRequest) -> Result<ValidQuestion, CoreError> {
    let asker_name = required_text(request.asker_name, "askerName", MAX_ASKER_NAME_LEN)?;
    let question = required_text(request.question, "question", MAX_QUESTION_LEN)?;
    Ok(ValidQuestion {
        asker_name,
        question,
    })
}

fn required_text(
    value: Option<String>,
    field: &'static str,
    max_len: usize,
) -> Result<String, CoreError> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CoreError::invalid_field(field, format!("{field} is required")))?;
    if value.chars().count() > max_len {
        return Err(CoreError::invalid_field(
            field,
            format!("{field} must be at most {max_len} characters"),
        ));
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// Election lookup
// ---------------------------------------------------------------------------

/// Validate a member number for election lookup: digits only, 1..=20 chars.
pub fn validate_member_no(raw: Option<&str>) -> Result<String, CoreError> {
    let value = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CoreError::invalid_field("member_no", "member_no is required"))?;
    if value.len() > MAX_MEMBER_NO_LEN || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::invalid_field(
            "member_no",
            format!("member_no must be 1-{MAX_MEMBER_NO_LEN} digits"),
        ));
    }
    Ok(value.to_string())
}
