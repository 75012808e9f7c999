//! Handlers for referral stats and click tracking.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use lucrum_core::error::CoreError;
use lucrum_core::referral::{self, RecordClick};
use lucrum_db::repositories::{ReferralRepo, UserRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /referral/stats
// ---------------------------------------------------------------------------

/// The caller's referral code with total and unique click counts.
///
/// A code is assigned on the first call and kept from then on.
pub async fn get_stats(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let code = ReferralRepo::ensure_code(&state.pool, auth.user_id, &referral::new_referral_code())
        .await?
        .ok_or(CoreError::NotFound {
            entity: "user",
            id: auth.user_id,
        })?;

    let stats = ReferralRepo::stats(&state.pool, auth.user_id, code).await?;

    Ok(Json(DataResponse { data: stats }))
}

// ---------------------------------------------------------------------------
// POST /referral/click
// ---------------------------------------------------------------------------

/// Record that the caller followed another user's referral link.
pub async fn record_click(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<RecordClick>,
) -> AppResult<impl IntoResponse> {
    let referrer_id = referral::validate_click(&input, auth.user_id)?;

    if UserRepo::find_by_id(&state.pool, referrer_id).await?.is_none() {
        return Err(CoreError::NotFound {
            entity: "user",
            id: referrer_id,
        }
        .into());
    }

    let click = ReferralRepo::record_click(&state.pool, referrer_id, auth.user_id).await?;

    tracing::info!(referrer_id, clicked_by = auth.user_id, "Referral click recorded");

    Ok((StatusCode::CREATED, Json(DataResponse { data: click })))
}
