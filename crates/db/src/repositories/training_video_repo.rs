//! Repository for the `training_videos` table.

use lucrum_core::types::DbId;
use sqlx::PgPool;

use crate::models::training::{CreateTrainingVideo, TrainingVideo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, video_url, order_number, created_at, updated_at";

/// Provides CRUD operations for training videos.
pub struct TrainingVideoRepo;

impl TrainingVideoRepo {
    /// Insert a new training video, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTrainingVideo,
    ) -> Result<TrainingVideo, sqlx::Error> {
        let query = format!(
            "INSERT INTO training_videos (title, description, video_url, order_number) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrainingVideo>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.video_url)
            .bind(input.order_number)
            .fetch_one(pool)
            .await
    }

    /// Find a training video by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TrainingVideo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM training_videos WHERE id = $1");
        sqlx::query_as::<_, TrainingVideo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all training videos in sequence order.
    pub async fn list_ordered(pool: &PgPool) -> Result<Vec<TrainingVideo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM training_videos ORDER BY order_number, id");
        sqlx::query_as::<_, TrainingVideo>(&query)
            .fetch_all(pool)
            .await
    }

    /// Number of videos in the catalog.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM training_videos")
            .fetch_one(pool)
            .await
    }
}
