use serde::Serialize;
use sqlx::FromRow;

/// A row from the `election_voters` roll, keyed by member number.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ElectionVoter {
    pub member_no: String,
    pub full_name: String,
    pub unit_name: Option<String>,
    pub polling_place: Option<String>,
    pub sequence_no: Option<i32>,
}
