//! Repository for the `election_voters` roll.

use sqlx::PgPool;

use crate::models::election::ElectionVoter;

pub struct ElectionRepo;

impl ElectionRepo {
    /// Look up a voter by member number.
    pub async fn find_by_member_no(
        pool: &PgPool,
        member_no: &str,
    ) -> Result<Option<ElectionVoter>, sqlx::Error> {
        sqlx::query_as::<_, ElectionVoter>(
            "SELECT member_no, full_name, unit_name, polling_place, sequence_no
             FROM election_voters
             WHERE member_no = $1",
        )
        .bind(member_no)
        .fetch_optional(pool)
        .await
    }

    /// Insert or replace a roll entry.
    pub async fn upsert(pool: &PgPool, voter: &ElectionVoter) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO election_voters (member_no, full_name, unit_name, polling_place, sequence_no)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (member_no) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                unit_name = EXCLUDED.unit_name,
                polling_place = EXCLUDED.polling_place,
                sequence_no = EXCLUDED.sequence_no",
        )
        .bind(&voter.member_no)
        .bind(&voter.full_name)
        .bind(&voter.unit_name)
        .bind(&voter.polling_place)
        .bind(voter.sequence_no)
        .execute(pool)
        .await?;
        Ok(())
    }
}
