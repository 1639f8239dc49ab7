use axum::{Router, extract::FromRef, http::HeaderName};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Navigation policy: pure decisions over a session.
pub mod authorizer;
pub mod catalog;
pub mod models;

// Auth state: the one-time check, the session store and token handling.
pub mod auth;
pub mod session;

pub mod config;
pub mod handlers;

// HTTP surface of the navigation service.
pub mod routes;

// --- Public Re-exports ---

pub use authorizer::{authorize, decide_root, navigable_routes, protect, resolve, should_mount_router};
pub use config::AppConfig;
pub use models::{NavigationDecision, RenderTarget, RouteDef, Session, User, View, Visibility};
pub use session::{AuthCheck, AuthCheckError, SessionStore};

/// ApiDoc
///
/// OpenAPI document for the navigation service, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::auth_check, handlers::navigate, handlers::list_routes),
    components(
        schemas(
            models::User, models::Session, models::View, models::Visibility,
            models::RenderTarget, models::NavigationDecision, models::RouteSummary,
        )
    ),
    tags(
        (name = "shop-navigator", description = "Storefront navigation policy")
    )
)]
struct ApiDoc;

/// AppState
///
/// Shared, immutable state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the navigation service: API routes, Swagger UI, request-id correlation,
/// tracing and CORS.
pub fn create_router(state: AppState) -> Router {
    // The shell calling /navigate is served from another origin.
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(routes::api_routes())
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Span for one HTTP request, tagged with its `x-request-id`.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
