//! Route Catalog Index
//!
//! The static, build-time list of browser routes, segregated by guard the same way the
//! navigable set is assembled at runtime: public, any-authenticated, admin-only and
//! shopper-only. Nothing is registered at runtime; role-dependent route sets are this
//! catalog filtered by `Visibility::admits`.

use crate::models::RouteDef;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Routes reachable by anyone once the auth check has resolved.
pub mod public;

/// Routes for any signed-in user.
pub mod authenticated;

/// Routes restricted to administrators.
pub mod admin;

/// Routes restricted to signed-in shoppers (non-admin).
pub mod user;

// --- Path Surface ---
// Other parts of the front-end link and redirect to these literals; they must not drift.

pub const ROOT_PATH: &str = "/";
pub const CATCH_ALL: &str = "*";
pub const LOGIN_PATH: &str = "/login";
pub const ADMIN_LANDING_PATH: &str = "/admin/dashboard";
pub const SHOPPER_LANDING_PATH: &str = "/home";

static CATALOG: LazyLock<Vec<RouteDef>> = LazyLock::new(|| {
    [public::ROUTES, authenticated::ROUTES, admin::ROUTES, user::ROUTES].concat()
});

/// catalog
///
/// Every guarded entry, in match order. The root path and the catch-all are not entries:
/// the root has its own redirect rule and the catch-all is whatever nothing else matched.
pub fn catalog() -> &'static [RouteDef] {
    &CATALOG
}

/// is_root
///
/// True when `path` (after dropping query, fragment and a trailing slash) is `/`.
pub fn is_root(path: &str) -> bool {
    normalize(path) == ROOT_PATH
}

/// match_pattern
///
/// Matches a requested browser path against a catalog pattern, returning the named
/// parameters on success.
///
/// - `:name` segments match exactly one non-empty segment.
/// - Static segments compare ASCII case-insensitively.
/// - Query string, fragment and a single trailing slash are ignored.
/// - Parameter values are percent-decoded; a segment that does not decode to UTF-8 is kept raw.
pub fn match_pattern(pattern: &str, path: &str) -> Option<BTreeMap<String, String>> {
    let path = normalize(path);
    let mut wanted = pattern.split('/');
    let mut given = path.split('/');
    let mut params = BTreeMap::new();

    loop {
        match (wanted.next(), given.next()) {
            (None, None) => return Some(params),
            (Some(expected), Some(segment)) => {
                if let Some(name) = expected.strip_prefix(':') {
                    if segment.is_empty() {
                        return None;
                    }
                    params.insert(name.to_string(), decode_segment(segment));
                } else if !expected.eq_ignore_ascii_case(segment) {
                    return None;
                }
            }
            // Segment counts differ.
            _ => return None,
        }
    }
}

/// find
///
/// First entry of `routes` whose pattern matches `path`, with its parameters.
pub fn find<'a, I>(routes: I, path: &str) -> Option<(&'a RouteDef, BTreeMap<String, String>)>
where
    I: IntoIterator<Item = &'a RouteDef>,
{
    routes
        .into_iter()
        .find_map(|route| match_pattern(route.path, path).map(|params| (route, params)))
}

fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let mut normalized = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}
