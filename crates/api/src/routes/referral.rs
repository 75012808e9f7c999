//! Route definitions for referral tracking.
//!
//! Mounted at `/referral` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::referral;
use crate::state::AppState;

/// Referral routes.
///
/// ```text
/// GET    /stats    -> get_stats
/// POST   /click    -> record_click
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(referral::get_stats))
        .route("/click", post(referral::record_click))
}
