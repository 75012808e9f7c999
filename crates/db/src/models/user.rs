//! User entity model and DTOs.
//!
//! Users are created by the external auth service. This service reads them
//! and owns only the `has_dashboard_access` flag.

use lucrum_core::store::Trainee;
use lucrum_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub name: Option<String>,
    pub has_dashboard_access: bool,
    /// Assigned on the first referral stats request.
    pub referral_code: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&User> for Trainee {
    fn from(user: &User) -> Self {
        Trainee {
            id: user.id,
            has_dashboard_access: user.has_dashboard_access,
        }
    }
}

/// DTO for creating a user (seeding and tests).
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub name: Option<String>,
}
