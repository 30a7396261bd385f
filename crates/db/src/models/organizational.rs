//! Organizational chart member model.

use coopsite_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `organizational_members` table.
///
/// Name and position are nullable in the legacy data; rows missing them are
/// still published.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrganizationalMember {
    pub id: DbId,
    pub full_name: Option<String>,
    pub position: Option<String>,
    pub group_name: Option<String>,
    /// Stored upload path, in whatever form the back office wrote it.
    pub image_path: Option<String>,
    pub sort_order: i32,
}

/// DTO for inserting a member (fixtures and tooling only; the public site
/// never writes this table).
#[derive(Debug, Clone, Default)]
pub struct CreateOrganizationalMember {
    pub full_name: Option<String>,
    pub position: Option<String>,
    pub group_name: Option<String>,
    pub image_path: Option<String>,
    pub sort_order: i32,
}
