//! Route definitions for training progression.
//!
//! Mounted at `/training` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::training;
use crate::state::AppState;

/// Training routes.
///
/// ```text
/// GET    /progress              -> get_progress
/// POST   /progress              -> submit_progress
/// GET    /videos                -> list_videos
/// GET    /videos/{id}/source    -> get_video_source
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/progress",
            get(training::get_progress).post(training::submit_progress),
        )
        .route("/videos", get(training::list_videos))
        .route("/videos/{id}/source", get(training::get_video_source))
}
