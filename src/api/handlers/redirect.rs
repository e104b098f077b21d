//! Fallback handler resolving documentation paths.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

use crate::api::dto::page::PageResponse;
use crate::application::services::Resolution;
use crate::error::AppError;
use crate::state::AppState;

/// Paths served by the static asset pipeline, never by the resolver.
const UNHANDLED_PREFIXES: &[&str] = &["/_next", "/assets"];

/// Resolves any path not claimed by another route.
///
/// # Endpoint
///
/// `GET /{*path}`
///
/// # Response Codes
///
/// - **301 Moved Permanently**: Old path; `Location` holds the canonical
///   path with the original query string
/// - **200 OK**: Canonical path (or English fallback of a translation)
/// - **404 Not Found**: Unknown path or asset path
pub async fn resolve_handler(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Response, AppError> {
    let path = uri.path();

    if UNHANDLED_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return Err(AppError::not_found("Page not found", json!({ "path": path })));
    }

    match state.redirect_service.find_page(path) {
        Resolution::Redirect(target) => {
            let location = match uri.query() {
                Some(query) => format!("{target}?{query}"),
                None => target,
            };
            debug!(from = path, to = %location, "Redirecting old path");

            Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
        }
        Resolution::Page { href, page } => Ok(Json(PageResponse::new(href, &page)).into_response()),
        Resolution::NotFound => Err(AppError::not_found("Page not found", json!({ "path": path }))),
    }
}
