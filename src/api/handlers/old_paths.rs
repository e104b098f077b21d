//! Handler for old-path derivation.

use axum::{
    Json,
    extract::{Query, State},
};
use validator::Validate;

use crate::api::dto::old_paths::{OldPathsQuery, OldPathsResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists every historical URL that should redirect to `path`.
///
/// # Endpoint
///
/// `GET /api/old-paths?path=/en/enterprise-server@3.11/admin&version=enterprise-server@3.11`
///
/// `language` defaults to `en`. The result is sorted.
///
/// # Errors
///
/// Returns 400 Bad Request if `path` is not root-relative or a parameter is
/// missing or empty.
pub async fn old_paths_handler(
    State(state): State<AppState>,
    Query(query): Query<OldPathsQuery>,
) -> Result<Json<OldPathsResponse>, AppError> {
    query.validate()?;

    let mut old_paths: Vec<String> = state
        .deriver()
        .derive_old_paths(&query.path, &query.language, &query.version)
        .into_iter()
        .collect();
    old_paths.sort_unstable();

    Ok(Json(OldPathsResponse {
        path: query.path,
        count: old_paths.len(),
        old_paths,
    }))
}
