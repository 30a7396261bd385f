//! Repository for the `organizational_members` table.

use sqlx::PgPool;

use crate::models::organizational::{CreateOrganizationalMember, OrganizationalMember};

const COLUMNS: &str = "id, full_name, position, group_name, image_path, sort_order";

pub struct OrganizationalRepo;

impl OrganizationalRepo {
    /// All active members, grouped by `group_name` then `sort_order`.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<OrganizationalMember>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM organizational_members
             WHERE is_active
             ORDER BY group_name ASC NULLS LAST, sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, OrganizationalMember>(&query)
            .fetch_all(pool)
            .await
    }

    /// Insert a member, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateOrganizationalMember,
    ) -> Result<OrganizationalMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO organizational_members (full_name, position, group_name, image_path, sort_order)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrganizationalMember>(&query)
            .bind(&input.full_name)
            .bind(&input.position)
            .bind(&input.group_name)
            .bind(&input.image_path)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }
}
