//! Per-user training progression: completion, locking, and the aggregate.
//!
//! Everything here is a pure function of `(catalog, progress records)`. The
//! read path and the write path both go through [`assemble_progress`], so
//! they cannot disagree about which videos are locked.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::CoreError;
use crate::store::{ProgressRecord, Question, Video};
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// A question as shown to the trainee: the correct answer is stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub id: DbId,
    pub prompt: String,
    pub options: Vec<String>,
    pub order_number: i32,
    pub kind: String,
}

impl From<&Question> for QuestionView {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            prompt: q.prompt.clone(),
            options: q.options.clone(),
            order_number: q.order_number,
            kind: q.kind.clone(),
        }
    }
}

/// A catalog entry without any user progress, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogVideoView {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub video_url: String,
    pub order_number: i32,
    pub questions: Vec<QuestionView>,
}

impl From<&Video> for CatalogVideoView {
    fn from(v: &Video) -> Self {
        Self {
            id: v.id,
            title: v.title.clone(),
            description: v.description.clone(),
            video_url: v.video_url.clone(),
            order_number: v.order_number,
            questions: v.questions.iter().map(QuestionView::from).collect(),
        }
    }
}

/// One video of the catalog annotated with a user's progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoProgressView {
    pub video_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub video_url: String,
    pub order_number: i32,
    pub watched: bool,
    pub completed: bool,
    pub questions_completed: i32,
    pub total_questions: usize,
    pub is_locked: bool,
    pub updated_at: Option<Timestamp>,
    pub questions: Vec<QuestionView>,
}

/// The full progression state returned by both fetch and submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainingProgress {
    pub videos: Vec<VideoProgressView>,
    pub completed_count: usize,
    pub total_count: usize,
    pub all_complete: bool,
    pub has_dashboard_access: bool,
}

impl TrainingProgress {
    /// Find the view for a video id.
    pub fn video(&self, video_id: DbId) -> Option<&VideoProgressView> {
        self.videos.iter().find(|v| v.video_id == video_id)
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Whether a video counts as completed.
///
/// Without questions, watching is enough. With questions, every question
/// must also have been answered correctly.
pub fn is_video_completed(watched: bool, questions_completed: i32, total_questions: usize) -> bool {
    if total_questions == 0 {
        return watched;
    }
    watched && questions_completed >= 0 && questions_completed as usize >= total_questions
}

/// The `questions_completed` value to store for a graded submission.
///
/// Forced to 0 for videos without questions, otherwise clamped to the
/// question count.
pub fn normalized_question_count(total_questions: usize, correct_count: usize) -> i32 {
    if total_questions == 0 {
        return 0;
    }
    let clamped = correct_count.min(total_questions);
    i32::try_from(clamped).unwrap_or(i32::MAX)
}

/// Sort the catalog (and each video's questions) by order number.
///
/// Order numbers must be positive and unique. Gaps are tolerated; the
/// "preceding" video is simply the previous one in order.
pub fn order_catalog(mut catalog: Vec<Video>) -> Result<Vec<Video>, CoreError> {
    let mut seen = HashSet::with_capacity(catalog.len());
    for video in &catalog {
        if video.order_number < 1 {
            return Err(CoreError::InvalidCatalogData(format!(
                "Video {} has non-positive order number {}",
                video.id, video.order_number
            )));
        }
        if !seen.insert(video.order_number) {
            return Err(CoreError::InvalidCatalogData(format!(
                "Order number {} is used by more than one video",
                video.order_number
            )));
        }
    }

    catalog.sort_by_key(|v| v.order_number);
    for video in &mut catalog {
        video.questions.sort_by_key(|q| q.order_number);
    }
    Ok(catalog)
}

/// Build the progression view for one user.
///
/// `catalog` must already be ordered (see [`order_catalog`]). Videos without
/// a record count as not watched and not completed. A video is unlocked iff
/// it is the first one or the video immediately before it is completed.
pub fn assemble_progress(
    catalog: &[Video],
    records: &[ProgressRecord],
    has_dashboard_access: bool,
) -> TrainingProgress {
    let by_video: HashMap<DbId, &ProgressRecord> =
        records.iter().map(|r| (r.video_id, r)).collect();

    let mut videos = Vec::with_capacity(catalog.len());
    let mut previous_completed = true;

    for video in catalog {
        let record = by_video.get(&video.id);
        let watched = record.is_some_and(|r| r.watched);
        let questions_completed = record.map_or(0, |r| r.questions_completed);
        let total_questions = video.questions.len();
        let completed = is_video_completed(watched, questions_completed, total_questions);

        videos.push(VideoProgressView {
            video_id: video.id,
            title: video.title.clone(),
            description: video.description.clone(),
            video_url: video.video_url.clone(),
            order_number: video.order_number,
            watched,
            completed,
            questions_completed,
            total_questions,
            is_locked: !previous_completed,
            updated_at: record.map(|r| r.updated_at),
            questions: video.questions.iter().map(QuestionView::from).collect(),
        });

        previous_completed = completed;
    }

    let completed_count = videos.iter().filter(|v| v.completed).count();
    let total_count = videos.len();

    TrainingProgress {
        videos,
        completed_count,
        total_count,
        // Vacuously true for an empty catalog.
        all_complete: completed_count == total_count,
        has_dashboard_access,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
