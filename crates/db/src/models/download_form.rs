use coopsite_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `download_forms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DownloadForm {
    pub id: DbId,
    pub title: String,
    pub category: Option<String>,
    pub file_path: Option<String>,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateDownloadForm {
    pub title: String,
    pub category: Option<String>,
    pub file_path: Option<String>,
    pub sort_order: i32,
}
