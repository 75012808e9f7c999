//! Repository for referral codes and the `referral_clicks` table.

use lucrum_core::referral::ReferralStats;
use lucrum_core::types::DbId;
use sqlx::PgPool;

use crate::models::referral::ReferralClick;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, referrer_id, clicked_by, created_at";

/// Records referral clicks and reports per-referrer counts.
pub struct ReferralRepo;

impl ReferralRepo {
    /// Return the user's referral code, storing `candidate` if none is set.
    ///
    /// `None` if the user does not exist.
    pub async fn ensure_code(
        pool: &PgPool,
        user_id: DbId,
        candidate: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "UPDATE users SET referral_code = COALESCE(referral_code, $2) \
             WHERE id = $1 \
             RETURNING referral_code",
        )
        .bind(user_id)
        .bind(candidate)
        .fetch_optional(pool)
        .await
    }

    /// Record one click on `referrer_id`'s link by `clicked_by`.
    pub async fn record_click(
        pool: &PgPool,
        referrer_id: DbId,
        clicked_by: DbId,
    ) -> Result<ReferralClick, sqlx::Error> {
        let query = format!(
            "INSERT INTO referral_clicks (referrer_id, clicked_by) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReferralClick>(&query)
            .bind(referrer_id)
            .bind(clicked_by)
            .fetch_one(pool)
            .await
    }

    /// Total and unique (by clicking user) click counts for a referrer.
    pub async fn stats(
        pool: &PgPool,
        referrer_id: DbId,
        referral_code: String,
    ) -> Result<ReferralStats, sqlx::Error> {
        let (total_clicks, unique_clicks): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(DISTINCT clicked_by) \
             FROM referral_clicks WHERE referrer_id = $1",
        )
        .bind(referrer_id)
        .fetch_one(pool)
        .await?;

        Ok(ReferralStats {
            referral_code,
            total_clicks,
            unique_clicks,
        })
    }
}
