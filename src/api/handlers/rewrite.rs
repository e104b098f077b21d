//! Handler for batch link rewriting.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::rewrite::{RewriteRequest, RewriteResponse, RewriteResultItem, RewriteSummary};
use crate::domain::link_rewriter::Anchor;
use crate::error::AppError;
use crate::state::AppState;

/// Rewrites the local links of one rendered page.
///
/// # Endpoint
///
/// `POST /api/rewrite`
///
/// # Request Body
///
/// ```json
/// {
///   "language": "en",
///   "version": "enterprise-server@3.11",
///   "anchors": [
///     { "href": "/admin/foo" },
///     { "href": "/desktop/install", "classes": ["dotcom-only"] }
///   ]
/// }
/// ```
///
/// # Response
///
/// Items keep request order. Anchors that are not root-relative are returned
/// unchanged and counted as `skipped`.
///
/// # Errors
///
/// - 400 Bad Request if validation fails
/// - 422 Unprocessable Entity if `language` is empty
pub async fn rewrite_handler(
    State(state): State<AppState>,
    Json(payload): Json<RewriteRequest>,
) -> Result<Json<RewriteResponse>, AppError> {
    payload.validate()?;

    let originals: Vec<String> = payload.anchors.iter().map(|a| a.href.clone()).collect();
    let mut anchors: Vec<Anchor> = payload
        .anchors
        .into_iter()
        .map(|item| Anchor {
            href: item.href,
            classes: item.classes,
        })
        .collect();

    let changed =
        state
            .link_rewriter
            .rewrite_local_links(&mut anchors, &payload.version, &payload.language)?;

    let skipped = originals.iter().filter(|href| !href.starts_with('/')).count();
    let items: Vec<RewriteResultItem> = originals
        .into_iter()
        .zip(anchors)
        .map(|(href, anchor)| RewriteResultItem {
            changed: href != anchor.href,
            href,
            rewritten: anchor.href,
        })
        .collect();

    Ok(Json(RewriteResponse {
        summary: RewriteSummary {
            total: items.len(),
            changed,
            skipped,
        },
        items,
    }))
}
