//! Persistence boundary for training progress.
//!
//! The progression logic never talks to a database directly. It reads the
//! catalog and a user's progress records, and writes merges and the dashboard
//! access flag, through [`ProgressStore`]. `lucrum-db` provides the
//! PostgreSQL implementation; [`crate::memory_store`] provides an in-process
//! one for tests.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One quiz question attached to a training video.
///
/// Carries the correct-answer marker, so it must never be serialized to
/// clients. Use [`crate::progression::QuestionView`] for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: DbId,
    pub prompt: String,
    pub options: Vec<String>,
    /// Correct option marker: a letter (`A`, `b`, ...) or a zero-based index.
    pub answer: String,
    pub order_number: i32,
    pub kind: String,
}

/// A training video with its questions, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub video_url: String,
    /// 1-based position in the training sequence.
    pub order_number: i32,
    pub questions: Vec<Question>,
}

/// Stored progress for one (user, video) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressRecord {
    pub user_id: DbId,
    pub video_id: DbId,
    pub watched: bool,
    pub questions_completed: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The user flags the progression logic reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Trainee {
    pub id: DbId,
    pub has_dashboard_access: bool,
}

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Look up a user. `None` if the user does not exist.
    async fn find_trainee(&self, user_id: DbId) -> Result<Option<Trainee>, CoreError>;

    /// All training videos with their questions.
    async fn catalog(&self) -> Result<Vec<Video>, CoreError>;

    /// Every progress record stored for a user (possibly empty).
    async fn progress_for_user(&self, user_id: DbId) -> Result<Vec<ProgressRecord>, CoreError>;

    /// Insert or merge-upgrade the record for `(user_id, video_id)` as one
    /// atomic read-modify-write.
    ///
    /// The merged record has `watched = old.watched || watched` and
    /// `questions_completed = max(old, questions_completed)`. `updated_at`
    /// only moves when the merge changed something.
    async fn upsert_progress(
        &self,
        user_id: DbId,
        video_id: DbId,
        watched: bool,
        questions_completed: i32,
    ) -> Result<ProgressRecord, CoreError>;

    /// Set `has_dashboard_access = true` for a user.
    ///
    /// Returns `true` if the flag flipped, `false` if it was already granted.
    async fn grant_dashboard_access(&self, user_id: DbId) -> Result<bool, CoreError>;
}

/// Run a store call with an upper bound on its duration.
///
/// Expiry surfaces as [`CoreError::Timeout`] naming the operation.
pub async fn bounded<T, F>(limit: Duration, operation: &'static str, fut: F) -> Result<T, CoreError>
where
    F: Future<Output = Result<T, CoreError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(CoreError::Timeout(format!(
            "{operation} did not complete within {}ms",
            limit.as_millis()
        ))),
    }
}
