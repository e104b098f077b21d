//! API route configuration.

use crate::api::handlers::{old_paths_handler, rewrite_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes nested under `/api`.
///
/// # Endpoints
///
/// - `GET  /old-paths` - Old paths redirecting to a canonical path
/// - `POST /rewrite`   - Batch local link rewriting
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/old-paths", get(old_paths_handler))
        .route("/rewrite", post(rewrite_handler))
}
