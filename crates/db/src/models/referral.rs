//! Referral click entity model.

use lucrum_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `referral_clicks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReferralClick {
    pub id: DbId,
    pub referrer_id: DbId,
    pub clicked_by: DbId,
    pub created_at: Timestamp,
}
