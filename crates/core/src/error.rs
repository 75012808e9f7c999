use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The stored catalog is corrupt (e.g. an unreadable correct-answer marker).
    #[error("Invalid catalog data: {0}")]
    InvalidCatalogData(String),

    /// The backing store could not serve the request. Transient; the caller
    /// decides whether to retry.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether the failure is transient and worth retrying by the caller.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_) | Self::Timeout(_))
    }
}
