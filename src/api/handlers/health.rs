//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health with data-set checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Registry loaded and page catalog non-empty
/// - **503 Service Unavailable**: Catalog is empty
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "versions": { "status": "ok", "message": "Latest 3.11, 2 supported" },
///     "pages": { "status": "ok", "message": "1204 permalinks" },
///     "redirects": { "status": "ok", "message": "8815 old paths" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let registry = state.deriver().grammar().registry();
    let versions = CheckStatus::ok(format!(
        "Latest {}, {} supported",
        registry.latest(),
        registry.supported_versions().len()
    ));

    let page_count = state.redirect_service.page_count();
    let pages = if page_count > 0 {
        CheckStatus::ok(format!("{page_count} permalinks"))
    } else {
        CheckStatus::error("Page catalog is empty")
    };

    let redirects = CheckStatus::ok(format!(
        "{} old paths",
        state.redirect_service.redirect_count()
    ));

    let all_healthy = versions.is_ok() && pages.is_ok() && redirects.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            versions,
            pages,
            redirects,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
