//! Repository for the `news_items` table.

use coopsite_core::types::DbId;
use sqlx::PgPool;

use crate::models::news::{CreateNewsItem, NewsItem, NewsSummary};

const COLUMNS: &str = "id, title, summary, body, cover_image, published_at";

const SUMMARY_COLUMNS: &str = "id, title, summary, cover_image, published_at";

/// Only published items whose publish time has passed are public.
const PUBLIC_FILTER: &str = "is_published AND published_at <= NOW()";

pub struct NewsRepo;

impl NewsRepo {
    /// Count public news items.
    pub async fn count_published(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM news_items WHERE {PUBLIC_FILTER}");
        sqlx::query_scalar::<_, i64>(&query).fetch_one(pool).await
    }

    /// One page of public news, newest first.
    pub async fn list_published(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<NewsSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM news_items
             WHERE {PUBLIC_FILTER}
             ORDER BY published_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, NewsSummary>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Find a public news item by ID.
    pub async fn find_published(pool: &PgPool, id: DbId) -> Result<Option<NewsItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM news_items WHERE id = $1 AND {PUBLIC_FILTER}");
        sqlx::query_as::<_, NewsItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Raw `cover_image` column of a public news item.
    ///
    /// Outer `None`: no such item. Inner `None`: item has no cover.
    pub async fn find_cover(pool: &PgPool, id: DbId) -> Result<Option<Option<String>>, sqlx::Error> {
        let query = format!("SELECT cover_image FROM news_items WHERE id = $1 AND {PUBLIC_FILTER}");
        sqlx::query_scalar::<_, Option<String>>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a news item, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateNewsItem) -> Result<NewsItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO news_items (title, summary, body, cover_image, is_published, published_at)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, NOW()))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NewsItem>(&query)
            .bind(&input.title)
            .bind(&input.summary)
            .bind(&input.body)
            .bind(&input.cover_image)
            .bind(input.is_published)
            .bind(input.published_at)
            .fetch_one(pool)
            .await
    }
}
