use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// API Router Module
///
/// The navigation service's HTTP surface. Every endpoint is open: the caller's identity is
/// resolved per request by the infallible `CurrentUser` extractor, and an anonymous caller
/// simply gets the anonymous answer.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe for load balancers.
        .route("/health", get(|| async { "ok" }))
        // GET /auth/check
        // 200 with the user behind the session token, 401 otherwise.
        .route("/auth/check", get(handlers::auth_check))
        // GET /navigate?path=...
        // Render, redirect or not-found decision for one browser path.
        .route("/navigate", get(handlers::navigate))
        // GET /routes
        // The caller's navigable route set.
        .route("/routes", get(handlers::list_routes))
}
