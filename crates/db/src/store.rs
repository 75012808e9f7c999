//! PostgreSQL-backed [`ProgressStore`].

use std::collections::HashMap;

use async_trait::async_trait;
use lucrum_core::error::CoreError;
use lucrum_core::store::{ProgressRecord, ProgressStore, Question, Trainee, Video};
use lucrum_core::types::DbId;
use sqlx::PgPool;

use crate::repositories::{TrainingProgressRepo, TrainingQuestionRepo, TrainingVideoRepo, UserRepo};

/// [`ProgressStore`] over the repository layer. Cheap to clone.
#[derive(Clone)]
pub struct PgProgressStore {
    pool: PgPool,
}

impl PgProgressStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a driver error onto the store's error taxonomy.
///
/// Pool exhaustion is reported as a timeout; every other driver failure
/// means the store could not serve the call.
pub fn map_store_error(err: sqlx::Error) -> CoreError {
    match err {
        sqlx::Error::PoolTimedOut => {
            CoreError::Timeout("timed out waiting for a database connection".to_string())
        }
        other => CoreError::StorageUnavailable(other.to_string()),
    }
}

#[async_trait]
impl ProgressStore for PgProgressStore {
    async fn find_trainee(&self, user_id: DbId) -> Result<Option<Trainee>, CoreError> {
        let user = UserRepo::find_by_id(&self.pool, user_id)
            .await
            .map_err(map_store_error)?;
        Ok(user.as_ref().map(Trainee::from))
    }

    async fn catalog(&self) -> Result<Vec<Video>, CoreError> {
        let videos = TrainingVideoRepo::list_ordered(&self.pool)
            .await
            .map_err(map_store_error)?;
        let rows = TrainingQuestionRepo::list_all(&self.pool)
            .await
            .map_err(map_store_error)?;

        let mut questions: HashMap<DbId, Vec<Question>> = HashMap::new();
        for row in rows {
            let video_id = row.video_id;
            questions
                .entry(video_id)
                .or_default()
                .push(row.into_question()?);
        }

        tracing::debug!(videos = videos.len(), "Loaded training catalog");

        Ok(videos
            .into_iter()
            .map(|v| Video {
                questions: questions.remove(&v.id).unwrap_or_default(),
                id: v.id,
                title: v.title,
                description: v.description,
                video_url: v.video_url,
                order_number: v.order_number,
            })
            .collect())
    }

    async fn progress_for_user(&self, user_id: DbId) -> Result<Vec<ProgressRecord>, CoreError> {
        let rows = TrainingProgressRepo::list_for_user(&self.pool, user_id)
            .await
            .map_err(map_store_error)?;
        Ok(rows.into_iter().map(ProgressRecord::from).collect())
    }

    async fn upsert_progress(
        &self,
        user_id: DbId,
        video_id: DbId,
        watched: bool,
        questions_completed: i32,
    ) -> Result<ProgressRecord, CoreError> {
        let row = TrainingProgressRepo::upsert_merge(
            &self.pool,
            user_id,
            video_id,
            watched,
            questions_completed,
        )
        .await
        .map_err(map_store_error)?;
        Ok(row.into())
    }

    async fn grant_dashboard_access(&self, user_id: DbId) -> Result<bool, CoreError> {
        UserRepo::grant_dashboard_access(&self.pool, user_id)
            .await
            .map_err(map_store_error)
    }
}
