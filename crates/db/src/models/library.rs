//! Content library entity model and DTOs.

use lucrum_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `library_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LibraryItem {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub kind: String,
    pub file_path: String,
    pub thumbnail_path: Option<String>,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
    pub downloads: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a library item.
#[derive(Debug, Deserialize)]
pub struct CreateLibraryItem {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub kind: Option<String>,
    pub file_path: String,
    pub thumbnail_path: Option<String>,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
}
