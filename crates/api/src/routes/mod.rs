pub mod health;
pub mod library;
pub mod referral;
pub mod training;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /training/progress                  get progress, submit progress
/// /training/videos                    catalog listing
/// /training/videos/{id}/source        resolved playback source
///
/// /library/marketing                  marketing assets (dashboard access)
/// /library/cpa-legal                  CPA and legal documents (dashboard access)
///
/// /referral/stats                     own referral code and click counts
/// /referral/click                     record a referral click
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/training", training::router())
        .nest("/library", library::router())
        .nest("/referral", referral::router())
}
