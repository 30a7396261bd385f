//! Repository for the `download_forms` table.

use sqlx::PgPool;

use crate::models::download_form::{CreateDownloadForm, DownloadForm};

const COLUMNS: &str = "id, title, category, file_path, updated_at";

pub struct DownloadFormRepo;

impl DownloadFormRepo {
    /// All forms ordered by category, then display order, then title.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<DownloadForm>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM download_forms
             ORDER BY category ASC NULLS LAST, sort_order ASC, title ASC"
        );
        sqlx::query_as::<_, DownloadForm>(&query).fetch_all(pool).await
    }

    pub async fn create(pool: &PgPool, input: &CreateDownloadForm) -> Result<DownloadForm, sqlx::Error> {
        let query = format!(
            "INSERT INTO download_forms (title, category, file_path, sort_order)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DownloadForm>(&query)
            .bind(&input.title)
            .bind(&input.category)
            .bind(&input.file_path)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }
}
