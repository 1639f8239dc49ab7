//! Route Authorizer
//!
//! Pure functions of the `Session` and the requested path. Nothing here holds state or
//! performs I/O, so every decision can be recomputed whenever the session changes and
//! tested without mounting any UI.

use crate::catalog::{self, ADMIN_LANDING_PATH, LOGIN_PATH, SHOPPER_LANDING_PATH};
use crate::models::{NavigationDecision, RenderTarget, RouteDef, Session, Visibility};
use std::collections::BTreeMap;

/// should_mount_router
///
/// Top-level gate. Until the one-time auth check resolves the whole navigable surface is
/// withheld, public routes included, and the renderer shows an empty placeholder.
pub fn should_mount_router(auth_checked: bool) -> bool {
    auth_checked
}

/// decide_root
///
/// Where `/` sends the visitor. The order matters: "signed in?" is asked before "admin?"
/// and admin is asked before falling back to the shopper landing page.
pub fn decide_root(session: &Session) -> NavigationDecision {
    if !session.auth_checked {
        return NavigationDecision::Pending;
    }
    match session.user() {
        None => NavigationDecision::redirect(LOGIN_PATH),
        Some(user) if user.is_admin => NavigationDecision::redirect(ADMIN_LANDING_PATH),
        Some(_) => NavigationDecision::redirect(SHOPPER_LANDING_PATH),
    }
}

/// authorize
///
/// Classifies a matched catalog entry against the session.
///
/// Role-scoped routes the user may not use are absent from their navigable set, so they
/// resolve to the catch-all NotFound render rather than a redirect. `RequiresAuth` routes
/// are always registered and send anonymous visitors to `/login`.
pub fn authorize(
    route: &RouteDef,
    params: BTreeMap<String, String>,
    session: &Session,
) -> NavigationDecision {
    if !session.auth_checked {
        return NavigationDecision::Pending;
    }
    let user = session.user();
    match route.visibility {
        Visibility::Public => NavigationDecision::Render(RenderTarget::new(route, params)),
        Visibility::RequiresAuth if user.is_none() => NavigationDecision::redirect(LOGIN_PATH),
        visibility if visibility.admits(user) => {
            NavigationDecision::Render(RenderTarget::new(route, params))
        }
        _ => NavigationDecision::not_found(),
    }
}

/// protect
///
/// Render-time re-check for guarded routes. `decision` was computed earlier; `session` is the
/// state at paint time, which may have moved on (logout in another tab, a role change). A
/// render of a guarded route survives only if a verified user is still present and the
/// route's guard still admits them; otherwise the visitor goes to `/login`.
pub fn protect(
    route: &RouteDef,
    decision: NavigationDecision,
    session: &Session,
) -> NavigationDecision {
    if !session.auth_checked {
        return NavigationDecision::Pending;
    }
    let NavigationDecision::Render(target) = decision else {
        return decision;
    };
    // Catch-all renders pass through untouched.
    if !route.visibility.is_guarded() || target.view != route.view {
        return NavigationDecision::Render(target);
    }
    match session.user() {
        Some(user) if user.is_verified && route.visibility.admits(Some(user)) => {
            NavigationDecision::Render(target)
        }
        _ => NavigationDecision::redirect(LOGIN_PATH),
    }
}

/// navigable_routes
///
/// The route set registered for this session: the static catalog filtered by each entry's
/// guard. Empty until the auth check has resolved. `RequiresAuth` entries stay registered
/// for anonymous visitors so that they redirect to login instead of showing NotFound.
pub fn navigable_routes(session: &Session) -> Vec<&'static RouteDef> {
    if !should_mount_router(session.auth_checked) {
        return Vec::new();
    }
    let user = session.user();
    catalog::catalog()
        .iter()
        .filter(|route| route.visibility == Visibility::RequiresAuth || route.visibility.admits(user))
        .collect()
}

/// resolve
///
/// The full decision for a browser path: gate, root rule, first match in the navigable set,
/// guard classification, Protected re-check, and finally the catch-all. Total over its input.
pub fn resolve(path: &str, session: &Session) -> NavigationDecision {
    let decision = if !should_mount_router(session.auth_checked) {
        NavigationDecision::Pending
    } else if catalog::is_root(path) {
        decide_root(session)
    } else {
        match catalog::find(navigable_routes(session), path) {
            Some((route, params)) => protect(route, authorize(route, params, session), session),
            None => NavigationDecision::not_found(),
        }
    };

    tracing::debug!(
        path,
        auth_checked = session.auth_checked,
        signed_in = session.current_user.is_some(),
        decision = ?decision,
        "navigation resolved"
    );
    decision
}
