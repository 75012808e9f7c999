//! Route definitions for the content libraries.
//!
//! Mounted at `/library` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::library;
use crate::state::AppState;

/// Library routes.
///
/// ```text
/// GET    /marketing    -> list_marketing
/// GET    /cpa-legal    -> list_cpa_legal
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/marketing", get(library::list_marketing))
        .route("/cpa-legal", get(library::list_cpa_legal))
}
