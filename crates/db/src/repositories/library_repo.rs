//! Repository for the `library_items` table.

use sqlx::PgPool;

use crate::models::library::{CreateLibraryItem, LibraryItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, category, kind, file_path, thumbnail_path, \
     file_size, mime_type, downloads, created_at";

/// Provides CRUD operations for content library items.
pub struct LibraryRepo;

impl LibraryRepo {
    /// Insert a new library item, returning the created row.
    ///
    /// `kind` defaults to `document` when not provided.
    pub async fn create(pool: &PgPool, input: &CreateLibraryItem) -> Result<LibraryItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO library_items \
                 (title, description, category, kind, file_path, thumbnail_path, file_size, mime_type) \
             VALUES ($1, $2, $3, COALESCE($4, 'document'), $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LibraryItem>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.kind)
            .bind(&input.file_path)
            .bind(&input.thumbnail_path)
            .bind(input.file_size)
            .bind(&input.mime_type)
            .fetch_one(pool)
            .await
    }

    /// List items in any of the given categories, grouped by category and
    /// newest first within each.
    pub async fn list_by_categories(
        pool: &PgPool,
        categories: &[&str],
    ) -> Result<Vec<LibraryItem>, sqlx::Error> {
        let categories: Vec<String> = categories.iter().map(|c| c.to_string()).collect();
        let query = format!(
            "SELECT {COLUMNS} FROM library_items \
             WHERE category = ANY($1) \
             ORDER BY category, created_at DESC, id DESC"
        );
        sqlx::query_as::<_, LibraryItem>(&query)
            .bind(categories)
            .fetch_all(pool)
            .await
    }
}
