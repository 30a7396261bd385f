//! Row-to-view transformation.
//!
//! Database rows carry stored upload paths in whatever form the back office
//! wrote them. Views carry resolved public URLs (or `null`) and are what the
//! cache stores, so a cache hit never re-runs path rewriting.

use chrono::NaiveDate;
use coopsite_core::files::FileArea;
use coopsite_core::media::is_inline_base64;
use coopsite_core::pagination::PageMeta;
use coopsite_core::paths::to_public_path;
use coopsite_core::types::{DbId, Timestamp};
use coopsite_db::models::album::{AlbumPhoto, PhotoAlbum};
use coopsite_db::models::cookie_consent::CookieConsent;
use coopsite_db::models::download_form::DownloadForm;
use coopsite_db::models::election::ElectionVoter;
use coopsite_db::models::news::{NewsItem, NewsSummary};
use coopsite_db::models::organizational::OrganizationalMember;
use coopsite_db::models::question::Question;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationalMemberView {
    pub id: DbId,
    pub full_name: Option<String>,
    pub position: Option<String>,
    pub group_name: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: i32,
}

impl From<OrganizationalMember> for OrganizationalMemberView {
    fn from(row: OrganizationalMember) -> Self {
        if row.full_name.as_deref().map_or(true, |n| n.trim().is_empty()) {
            tracing::warn!(id = row.id, "Organizational member has no full_name");
        }
        Self {
            image_url: to_public_path(row.image_path.as_deref(), FileArea::Organizational),
            id: row.id,
            full_name: row.full_name,
            position: row.position,
            group_name: row.group_name,
            sort_order: row.sort_order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsSummaryView {
    pub id: DbId,
    pub title: String,
    pub summary: Option<String>,
    pub cover_url: Option<String>,
    pub published_at: Timestamp,
}

impl From<NewsSummary> for NewsSummaryView {
    fn from(row: NewsSummary) -> Self {
        Self {
            cover_url: news_cover_url(row.id, row.cover_image.as_deref()),
            id: row.id,
            title: row.title,
            summary: row.summary,
            published_at: row.published_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsDetailView {
    pub id: DbId,
    pub title: String,
    pub summary: Option<String>,
    pub body: Option<String>,
    pub cover_url: Option<String>,
    pub published_at: Timestamp,
}

impl From<NewsItem> for NewsDetailView {
    fn from(row: NewsItem) -> Self {
        Self {
            cover_url: news_cover_url(row.id, row.cover_image.as_deref()),
            id: row.id,
            title: row.title,
            summary: row.summary,
            body: row.body,
            published_at: row.published_at,
        }
    }
}

/// One page of news as stored under `news:list:<page>:<per_page>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsPage {
    pub items: Vec<NewsSummaryView>,
    pub meta: PageMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumView {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub photo_count: i64,
}

impl From<PhotoAlbum> for AlbumView {
    fn from(row: PhotoAlbum) -> Self {
        Self {
            cover_url: to_public_path(row.cover_path.as_deref(), FileArea::Album),
            id: row.id,
            title: row.title,
            description: row.description,
            event_date: row.event_date,
            photo_count: row.photo_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoView {
    pub id: DbId,
    pub url: Option<String>,
    pub caption: Option<String>,
}

impl From<AlbumPhoto> for PhotoView {
    fn from(row: AlbumPhoto) -> Self {
        let url = to_public_path(row.file_path.as_deref(), FileArea::Album);
        if url.is_none() {
            tracing::warn!(id = row.id, album_id = row.album_id, "Album photo has no file");
        }
        Self {
            id: row.id,
            url,
            caption: row.caption,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadFormView {
    pub id: DbId,
    pub title: String,
    pub category: Option<String>,
    pub file_url: Option<String>,
    pub updated_at: Timestamp,
}

impl From<DownloadForm> for DownloadFormView {
    fn from(row: DownloadForm) -> Self {
        let file_url = to_public_path(row.file_path.as_deref(), FileArea::DownloadForm);
        if file_url.is_none() {
            tracing::warn!(id = row.id, "Download form has no file");
        }
        Self {
            id: row.id,
            title: row.title,
            category: row.category,
            file_url,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub id: DbId,
    pub asker_name: String,
    pub question: String,
    pub answer: Option<String>,
    pub answered_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<Question> for QuestionView {
    fn from(row: Question) -> Self {
        Self {
            id: row.id,
            asker_name: row.asker_name,
            question: row.question,
            answer: row.answer,
            answered_at: row.answered_at,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionVoterView {
    pub member_no: String,
    pub full_name: String,
    pub unit_name: Option<String>,
    pub polling_place: Option<String>,
    pub sequence_no: Option<i32>,
}

impl From<ElectionVoter> for ElectionVoterView {
    fn from(row: ElectionVoter) -> Self {
        Self {
            member_no: row.member_no,
            full_name: row.full_name,
            unit_name: row.unit_name,
            polling_place: row.polling_place,
            sequence_no: row.sequence_no,
        }
    }
}

/// Acknowledgement for a recorded consent decision. The user agent is not
/// echoed back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieConsentView {
    pub consent_id: Uuid,
    pub consent_given: bool,
    pub categories: serde_json::Value,
    pub consent_date: Timestamp,
    pub recorded_at: Timestamp,
}

impl From<CookieConsent> for CookieConsentView {
    fn from(row: CookieConsent) -> Self {
        Self {
            consent_id: row.consent_id,
            consent_given: row.consent_given,
            categories: row.categories,
            consent_date: row.consent_date,
            recorded_at: row.created_at,
        }
    }
}

/// Convert every row, keeping order.
pub fn views<R, V: From<R>>(rows: Vec<R>) -> Vec<V> {
    rows.into_iter().map(V::from).collect()
}

/// Public URL of a news cover. Inline base64 covers are served by the cover
/// endpoint rather than embedded in the JSON.
fn news_cover_url(id: DbId, cover: Option<&str>) -> Option<String> {
    match cover.map(str::trim) {
        Some(value) if is_inline_base64(value) => Some(format!("/api/v1/news/{id}/cover")),
        other => to_public_path(other, FileArea::News),
    }
}
