//! Repository for the `user_training_progress` table.

use lucrum_core::types::DbId;
use sqlx::PgPool;

use crate::models::training::UserTrainingProgress;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, video_id, watched, questions_completed, created_at, updated_at";

/// Provides reads and the merge-upsert for per-video training progress.
pub struct TrainingProgressRepo;

impl TrainingProgressRepo {
    /// List all progress rows for a user.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<UserTrainingProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_training_progress \
             WHERE user_id = $1 \
             ORDER BY video_id"
        );
        sqlx::query_as::<_, UserTrainingProgress>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Insert or merge progress for a (user, video) pair in one statement.
    ///
    /// `watched` is OR-ed and `questions_completed` takes the maximum, so
    /// stored progress never regresses. The conflicting row is locked for the
    /// duration of the statement, which serializes concurrent merges.
    /// `updated_at` only moves when the merged values differ.
    pub async fn upsert_merge(
        pool: &PgPool,
        user_id: DbId,
        video_id: DbId,
        watched: bool,
        questions_completed: i32,
    ) -> Result<UserTrainingProgress, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_training_progress (user_id, video_id, watched, questions_completed) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_id, video_id) DO UPDATE SET \
                 watched = user_training_progress.watched OR EXCLUDED.watched, \
                 questions_completed = GREATEST( \
                     user_training_progress.questions_completed, EXCLUDED.questions_completed), \
                 updated_at = CASE \
                     WHEN (EXCLUDED.watched AND NOT user_training_progress.watched) \
                       OR EXCLUDED.questions_completed > user_training_progress.questions_completed \
                     THEN NOW() \
                     ELSE user_training_progress.updated_at \
                 END \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserTrainingProgress>(&query)
            .bind(user_id)
            .bind(video_id)
            .bind(watched)
            .bind(questions_completed)
            .fetch_one(pool)
            .await
    }
}
