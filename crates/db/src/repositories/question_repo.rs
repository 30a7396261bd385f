//! Repository for the `questions` table.

use coopsite_core::types::DbId;
use sqlx::PgPool;

use crate::models::question::{CreateQuestion, Question};

const COLUMNS: &str = "id, asker_name, question, answer, answered_at, created_at";

pub struct QuestionRepo;

impl QuestionRepo {
    /// Answered questions, most recently answered first.
    pub async fn list_answered(pool: &PgPool) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM questions
             WHERE answer IS NOT NULL
             ORDER BY answered_at DESC NULLS LAST, id DESC"
        );
        sqlx::query_as::<_, Question>(&query).fetch_all(pool).await
    }

    /// Record a new, unanswered question.
    pub async fn create(pool: &PgPool, input: &CreateQuestion) -> Result<Question, sqlx::Error> {
        let query = format!(
            "INSERT INTO questions (asker_name, question)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(&input.asker_name)
            .bind(&input.question)
            .fetch_one(pool)
            .await
    }

    /// Attach an answer to a question. Returns `None` if it does not exist.
    pub async fn answer(
        pool: &PgPool,
        id: DbId,
        answer: &str,
    ) -> Result<Option<Question>, sqlx::Error> {
        let query = format!(
            "UPDATE questions SET answer = $2, answered_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .bind(answer)
            .fetch_optional(pool)
            .await
    }
}
