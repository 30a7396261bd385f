//! Q&A question model.

use coopsite_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `questions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Question {
    pub id: DbId,
    pub asker_name: String,
    pub question: String,
    /// `None` until staff answer it; unanswered questions are not listed.
    pub answer: Option<String>,
    pub answered_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for a public question submission.
#[derive(Debug, Clone)]
pub struct CreateQuestion {
    pub asker_name: String,
    pub question: String,
}
