//! Liveness endpoint, mounted at the root rather than under `/api/v1`.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use lucrum_db::repositories::TrainingVideoRepo;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when PostgreSQL cannot be reached.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Training videos in the catalog. An empty catalog unlocks the
    /// dashboard for every user, so operators watch this number.
    pub catalog_videos: Option<i64>,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = lucrum_db::health_check(&state.pool).await.is_ok();
    let catalog_videos = if db_healthy {
        TrainingVideoRepo::count(&state.pool).await.ok()
    } else {
        None
    };

    if catalog_videos == Some(0) {
        tracing::warn!("Training catalog is empty");
    }

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        catalog_videos,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
