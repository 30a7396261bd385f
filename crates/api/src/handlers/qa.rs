//! Handlers for the public Q&A board.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use coopsite_cache::keys::QA_LIST;
use coopsite_cache::Ttl;
use coopsite_core::validation::{validate_question, QuestionRequest};
use coopsite_db::models::question::CreateQuestion;
use coopsite_db::repositories::QuestionRepo;

use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::transform::{views, QuestionView};

/// GET /api/v1/qa
///
/// Answered questions, newest first.
pub async fn list_questions(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<QuestionView>>> {
    let pool = &state.pool;
    let (questions, status) = state
        .cache
        .get_or_load(QA_LIST, Ttl::VOLATILE, move || async move {
            let rows = QuestionRepo::list_answered(pool).await?;
            Ok::<_, sqlx::Error>(views(rows))
        })
        .await?;

    Ok(ApiResponse::cached(questions, status, Ttl::VOLATILE))
}

/// POST /api/v1/qa
///
/// Submit a question. It stays hidden from the listing until answered, so
/// the `qa:list` entry is left alone.
pub async fn create_question(
    State(state): State<AppState>,
    body: Result<Json<QuestionRequest>, JsonRejection>,
) -> AppResult<ApiResponse<QuestionView>> {
    let Json(body) = body?;
    let valid = validate_question(body)?;

    let question = QuestionRepo::create(
        &state.pool,
        &CreateQuestion {
            asker_name: valid.asker_name,
            question: valid.question,
        },
    )
    .await?;

    tracing::info!(question_id = question.id, "Question submitted");

    Ok(ApiResponse::created(QuestionView::from(question))
        .with_message("Your question has been received"))
}
