//! Training video, question, and progress entity models and DTOs.

use lucrum_core::error::CoreError;
use lucrum_core::store::{ProgressRecord, Question};
use lucrum_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// A row from the `training_videos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrainingVideo {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub video_url: String,
    pub order_number: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a training video.
#[derive(Debug, Deserialize)]
pub struct CreateTrainingVideo {
    pub title: String,
    pub description: Option<String>,
    pub video_url: String,
    pub order_number: i32,
}

/// A row from the `training_questions` table.
///
/// Not `Serialize`: `answer` is the correct-option marker.
#[derive(Debug, Clone, FromRow)]
pub struct TrainingQuestion {
    pub id: DbId,
    pub video_id: DbId,
    pub prompt: String,
    /// A JSON array of option strings. Older rows hold the array encoded as
    /// a JSON string.
    pub options: Value,
    pub answer: String,
    pub order_number: i32,
    pub kind: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TrainingQuestion {
    /// Convert into the domain question, decoding `options`.
    pub fn into_question(self) -> Result<Question, CoreError> {
        let options = decode_options(self.id, self.options)?;
        Ok(Question {
            id: self.id,
            prompt: self.prompt,
            options,
            answer: self.answer,
            order_number: self.order_number,
            kind: self.kind,
        })
    }
}

fn decode_options(question_id: DbId, raw: Value) -> Result<Vec<String>, CoreError> {
    let invalid = || {
        CoreError::InvalidCatalogData(format!(
            "Question {question_id} has malformed options; expected a JSON array of strings"
        ))
    };
    let value = match raw {
        Value::String(encoded) => serde_json::from_str(&encoded).map_err(|_| invalid())?,
        other => other,
    };
    serde_json::from_value(value).map_err(|_| invalid())
}

/// DTO for creating a training question.
#[derive(Debug, Deserialize)]
pub struct CreateTrainingQuestion {
    pub video_id: DbId,
    pub prompt: String,
    pub options: Vec<String>,
    pub answer: String,
    pub order_number: i32,
    pub kind: Option<String>,
}

/// A row from the `user_training_progress` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserTrainingProgress {
    pub id: DbId,
    pub user_id: DbId,
    pub video_id: DbId,
    pub watched: bool,
    pub questions_completed: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<UserTrainingProgress> for ProgressRecord {
    fn from(row: UserTrainingProgress) -> Self {
        ProgressRecord {
            user_id: row.user_id,
            video_id: row.video_id,
            watched: row.watched,
            questions_completed: row.questions_completed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
