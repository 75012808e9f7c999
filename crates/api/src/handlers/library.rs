//! Handlers for the content libraries.
//!
//! Libraries are part of the dashboard, so every listing first checks that
//! the user's training is complete.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use lucrum_core::library::{self, CATEGORY_MARKETING, CPA_LEGAL_CATEGORIES};
use lucrum_core::training;
use lucrum_db::models::library::LibraryItem;
use lucrum_db::repositories::LibraryRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Check dashboard access, then list the given categories.
///
/// Access is read through the progression fetch so a grant that lagged
/// behind training completion is applied before the check.
async fn list_for(
    state: &AppState,
    auth: AuthUser,
    categories: &[&str],
) -> AppResult<Vec<LibraryItem>> {
    library::validate_categories(categories)?;

    let settings = state.config.training_settings();
    let progress =
        training::fetch_progress(state.store.as_ref(), &settings, auth.user_id).await?;
    library::require_dashboard_access(progress.has_dashboard_access)?;

    let items = LibraryRepo::list_by_categories(&state.pool, categories).await?;

    tracing::debug!(user_id = auth.user_id, count = items.len(), ?categories, "Listed library");

    Ok(items)
}

// ---------------------------------------------------------------------------
// GET /library/marketing
// ---------------------------------------------------------------------------

/// List marketing assets, newest first.
pub async fn list_marketing(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = list_for(&state, auth, &[CATEGORY_MARKETING]).await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// GET /library/cpa-legal
// ---------------------------------------------------------------------------

/// List CPA and legal documents, grouped by category.
pub async fn list_cpa_legal(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = list_for(&state, auth, CPA_LEGAL_CATEGORIES).await?;
    Ok(Json(DataResponse { data: items }))
}
