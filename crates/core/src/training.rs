//! Training progress operations: fetch and submit.
//!
//! Both operations load the catalog and the user's records through a
//! [`ProgressStore`] and build the view with
//! [`progression::assemble_progress`]. Nothing is cached between calls.
//! Store failures are returned to the caller as-is, never retried here.

use std::time::Duration;

use serde::Deserialize;

use crate::access_gate::ensure_dashboard_access;
use crate::error::CoreError;
use crate::progression::{self, TrainingProgress};
use crate::quiz::{self, AnswerInput};
use crate::store::{bounded, ProgressStore, Trainee, Video};
use crate::types::DbId;

/// Default upper bound for a single store call, in seconds.
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 20;

/// Tunables for the training operations.
#[derive(Debug, Clone, Copy)]
pub struct TrainingSettings {
    /// Upper bound for each individual store call.
    pub store_timeout: Duration,
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            store_timeout: Duration::from_secs(DEFAULT_STORE_TIMEOUT_SECS),
        }
    }
}

/// A quiz/watch submission for one video.
///
/// Completion is always derived from `answers` server-side. Unknown fields
/// such as a client-declared `completed` flag are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitProgress {
    pub video_id: DbId,
    /// Whether playback reached the end. Submissions are sent when the
    /// player ends, so this defaults to `true`.
    #[serde(default = "default_watched")]
    pub watched: bool,
    /// One entry per question, in question order. `null` leaves a question
    /// unanswered.
    #[serde(default)]
    pub answers: Vec<Option<AnswerInput>>,
}

fn default_watched() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Compute a user's current progression without writing progress.
///
/// Runs the access gate as well, so a grant that failed during an earlier
/// submission is retried here.
pub async fn fetch_progress<S>(
    store: &S,
    settings: &TrainingSettings,
    user_id: DbId,
) -> Result<TrainingProgress, CoreError>
where
    S: ProgressStore + ?Sized,
{
    let trainee = load_trainee(store, settings, user_id).await?;
    let catalog = load_catalog(store, settings).await?;

    recompute(store, settings, &trainee, &catalog).await
}

/// Merge a submission into stored progress and return the refreshed view.
///
/// Fails with `NotFound` for an unknown user or video and `Forbidden` when
/// the video is still locked. The progress write is committed before the
/// access gate runs; a gate failure does not fail the submission.
pub async fn submit_progress<S>(
    store: &S,
    settings: &TrainingSettings,
    user_id: DbId,
    submission: &SubmitProgress,
) -> Result<TrainingProgress, CoreError>
where
    S: ProgressStore + ?Sized,
{
    let trainee = load_trainee(store, settings, user_id).await?;
    let catalog = load_catalog(store, settings).await?;

    let video = catalog
        .iter()
        .find(|v| v.id == submission.video_id)
        .ok_or(CoreError::NotFound {
            entity: "training video",
            id: submission.video_id,
        })?;

    let records = bounded(
        settings.store_timeout,
        "progress_for_user",
        store.progress_for_user(user_id),
    )
    .await?;
    let current = progression::assemble_progress(&catalog, &records, trainee.has_dashboard_access);
    if current.video(video.id).is_some_and(|v| v.is_locked) {
        return Err(CoreError::Forbidden(format!(
            "Training video {} is locked until the previous video is completed",
            video.id
        )));
    }

    let selected = quiz::normalize_answers(&video.questions, &submission.answers)?;
    let outcome = quiz::evaluate(&video.questions, &selected)?;
    let questions_completed =
        progression::normalized_question_count(outcome.total_questions, outcome.correct_count);

    let record = bounded(
        settings.store_timeout,
        "upsert_progress",
        store.upsert_progress(user_id, video.id, submission.watched, questions_completed),
    )
    .await?;

    tracing::info!(
        user_id,
        video_id = video.id,
        watched = record.watched,
        questions_completed = record.questions_completed,
        all_correct = outcome.all_correct,
        "Training progress recorded"
    );

    recompute(store, settings, &trainee, &catalog).await
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_trainee<S>(
    store: &S,
    settings: &TrainingSettings,
    user_id: DbId,
) -> Result<Trainee, CoreError>
where
    S: ProgressStore + ?Sized,
{
    bounded(settings.store_timeout, "find_trainee", store.find_trainee(user_id))
        .await?
        .ok_or(CoreError::NotFound {
            entity: "user",
            id: user_id,
        })
}

async fn load_catalog<S>(store: &S, settings: &TrainingSettings) -> Result<Vec<Video>, CoreError>
where
    S: ProgressStore + ?Sized,
{
    let catalog = bounded(settings.store_timeout, "catalog", store.catalog()).await?;
    progression::order_catalog(catalog)
}

/// Reload the user's records, rebuild the view, and run the access gate.
async fn recompute<S>(
    store: &S,
    settings: &TrainingSettings,
    trainee: &Trainee,
    catalog: &[Video],
) -> Result<TrainingProgress, CoreError>
where
    S: ProgressStore + ?Sized,
{
    let records = bounded(
        settings.store_timeout,
        "progress_for_user",
        store.progress_for_user(trainee.id),
    )
    .await?;

    let mut progress =
        progression::assemble_progress(catalog, &records, trainee.has_dashboard_access);
    progress.has_dashboard_access =
        ensure_dashboard_access(store, settings.store_timeout, trainee, progress.all_complete)
            .await;

    Ok(progress)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
