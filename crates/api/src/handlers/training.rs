//! Handlers for training progress, the video catalog, and playback sources.
//!
//! All endpoints require authentication. Progress is recomputed from the
//! store on every request.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use lucrum_core::error::CoreError;
use lucrum_core::progression::{self, CatalogVideoView};
use lucrum_core::store::bounded;
use lucrum_core::training::{self, SubmitProgress};
use lucrum_core::types::DbId;
use lucrum_core::video_sources::resolve_video_source;
use lucrum_db::repositories::TrainingVideoRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /training/progress
// ---------------------------------------------------------------------------

/// Get the authenticated user's training progression.
///
/// Also grants dashboard access if training is complete and an earlier
/// grant did not go through.
pub async fn get_progress(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let settings = state.config.training_settings();
    let progress =
        training::fetch_progress(state.store.as_ref(), &settings, auth.user_id).await?;

    tracing::debug!(
        user_id = auth.user_id,
        completed = progress.completed_count,
        total = progress.total_count,
        "Fetched training progress"
    );

    Ok(Json(DataResponse { data: progress }))
}

// ---------------------------------------------------------------------------
// POST /training/progress
// ---------------------------------------------------------------------------

/// Record a watch/quiz submission for one video and return the refreshed
/// progression.
pub async fn submit_progress(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SubmitProgress>,
) -> AppResult<impl IntoResponse> {
    let settings = state.config.training_settings();
    let progress =
        training::submit_progress(state.store.as_ref(), &settings, auth.user_id, &input).await?;

    Ok(Json(DataResponse { data: progress }))
}

// ---------------------------------------------------------------------------
// GET /training/videos
// ---------------------------------------------------------------------------

/// List the training catalog in sequence order, without correct answers.
pub async fn list_videos(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let settings = state.config.training_settings();
    let catalog = bounded(settings.store_timeout, "catalog", state.store.catalog()).await?;
    let catalog = progression::order_catalog(catalog)?;

    let videos: Vec<CatalogVideoView> = catalog.iter().map(CatalogVideoView::from).collect();

    Ok(Json(DataResponse { data: videos }))
}

// ---------------------------------------------------------------------------
// GET /training/videos/{id}/source
// ---------------------------------------------------------------------------

/// Resolve where the player should load a training video from.
pub async fn get_video_source(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let video = TrainingVideoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "training video",
            id,
        })?;

    let source = resolve_video_source(&video.video_url, &state.config.video_upload_prefix)?;

    Ok(Json(DataResponse { data: source }))
}
