//! Repository for the `training_questions` table.

use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::training::{CreateTrainingQuestion, TrainingQuestion};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, video_id, prompt, options, answer, order_number, kind, created_at, updated_at";

/// Provides CRUD operations for training quiz questions.
pub struct TrainingQuestionRepo;

impl TrainingQuestionRepo {
    /// Insert a new question, returning the created row.
    ///
    /// `kind` defaults to `multiple_choice` when not provided.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTrainingQuestion,
    ) -> Result<TrainingQuestion, sqlx::Error> {
        let query = format!(
            "INSERT INTO training_questions (video_id, prompt, options, answer, order_number, kind) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'multiple_choice')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrainingQuestion>(&query)
            .bind(input.video_id)
            .bind(&input.prompt)
            .bind(Json(&input.options))
            .bind(&input.answer)
            .bind(input.order_number)
            .bind(&input.kind)
            .fetch_one(pool)
            .await
    }

    /// List every question across all videos, grouped by video and ordered
    /// within each video.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<TrainingQuestion>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM training_questions ORDER BY video_id, order_number, id");
        sqlx::query_as::<_, TrainingQuestion>(&query)
            .fetch_all(pool)
            .await
    }
}
