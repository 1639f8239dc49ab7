use crate::{
    auth::CurrentUser,
    authorizer,
    models::{NavigationDecision, RouteSummary, Session, User},
};
use axum::{Json, extract::Query, http::StatusCode};
use serde::Deserialize;

// --- Query Structs ---

/// NavigateQuery
///
/// Query parameters for `GET /navigate`.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct NavigateQuery {
    /// Browser path to evaluate, e.g. `/cart` or `/admin/product-update/42?tab=stock`.
    pub path: String,
}

// --- Handlers ---

/// auth_check
///
/// Who owns the presented session token. This is the endpoint `HttpAuthCheck` calls for
/// the one-time check.
#[utoipa::path(
    get,
    path = "/auth/check",
    responses(
        (status = 200, description = "Signed in", body = User),
        (status = 401, description = "No valid session")
    )
)]
pub async fn auth_check(CurrentUser(user): CurrentUser) -> Result<Json<User>, StatusCode> {
    user.map(Json).ok_or(StatusCode::UNAUTHORIZED)
}

/// navigate
///
/// Evaluates the navigation policy for `path` on behalf of the caller. A request always
/// carries a resolved identity, so the answer is never `pending`.
#[utoipa::path(
    get,
    path = "/navigate",
    params(NavigateQuery),
    responses((status = 200, description = "Navigation decision", body = NavigationDecision))
)]
pub async fn navigate(
    CurrentUser(user): CurrentUser,
    Query(query): Query<NavigateQuery>,
) -> Json<NavigationDecision> {
    let session = Session::checked(user);
    Json(authorizer::resolve(&query.path, &session))
}

/// list_routes
///
/// The navigable route set for the caller, in match order. Used by the shell to build menus
/// without duplicating the role rules.
#[utoipa::path(
    get,
    path = "/routes",
    responses((status = 200, description = "Navigable routes", body = [RouteSummary]))
)]
pub async fn list_routes(CurrentUser(user): CurrentUser) -> Json<Vec<RouteSummary>> {
    let session = Session::checked(user);
    let routes = authorizer::navigable_routes(&session)
        .into_iter()
        .map(RouteSummary::from)
        .collect();
    Json(routes)
}
