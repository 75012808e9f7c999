//! Referral links and click tracking.
//!
//! Every user gets a referral code the first time they ask for their stats.
//! A click is recorded when another signed-in user follows a referral link.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::DbId;

/// Length of a generated referral code.
pub const REFERRAL_CODE_LEN: usize = 10;

/// Click statistics for one referrer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferralStats {
    pub referral_code: String,
    pub total_clicks: i64,
    /// Distinct users who clicked.
    pub unique_clicks: i64,
}

/// Body of a referral click.
#[derive(Debug, Deserialize)]
pub struct RecordClick {
    pub referrer_id: Option<DbId>,
}

/// A fresh referral code: uppercase hex taken from a v4 UUID.
pub fn new_referral_code() -> String {
    let mut code = Uuid::new_v4().simple().to_string();
    code.truncate(REFERRAL_CODE_LEN);
    code.make_ascii_uppercase();
    code
}

/// Check a click and return the referrer it credits.
pub fn validate_click(input: &RecordClick, clicked_by: DbId) -> Result<DbId, CoreError> {
    let referrer_id = input
        .referrer_id
        .ok_or_else(|| CoreError::Validation("referrer_id is required".to_string()))?;

    if referrer_id == clicked_by {
        return Err(CoreError::Validation(
            "Users cannot follow their own referral link".to_string(),
        ));
    }
    Ok(referrer_id)
}
