use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;
use utoipa::ToSchema;

// --- Identity & Session ---

/// User
///
/// The slice of the logged-in user's profile that navigation depends on.
/// Other profile fields (name, addresses, ...) are owned by the front-end store and never read here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    // Admins land on the dashboard and never see shopper pages.
    pub is_admin: bool,
    // Unverified accounts are bounced to /login by the Protected re-check.
    // Payloads that omit the flag count as verified.
    #[serde(default = "verified_by_default")]
    pub is_verified: bool,
}

pub(crate) fn verified_by_default() -> bool {
    true
}

impl User {
    /// A verified shopper.
    pub fn shopper(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_admin: false,
            is_verified: true,
        }
    }

    /// A verified administrator.
    pub fn admin(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_admin: true,
            is_verified: true,
        }
    }

    pub fn unverified(mut self) -> Self {
        self.is_verified = false;
        self
    }
}

/// Session
///
/// The two facts the Auth State Provider exposes. `auth_checked` starts false and flips to
/// true exactly once, when the one-time session validation resolves (successfully or not).
/// `current_user` is only meaningful once `auth_checked` is true.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub auth_checked: bool,
    pub current_user: Option<User>,
}

impl Session {
    /// Initial state: nothing is known yet.
    pub fn unchecked() -> Self {
        Self::default()
    }

    /// Checked, nobody signed in.
    pub fn anonymous() -> Self {
        Self::checked(None)
    }

    /// Checked, with `user` signed in.
    pub fn signed_in(user: User) -> Self {
        Self::checked(Some(user))
    }

    pub fn checked(current_user: Option<User>) -> Self {
        Self {
            auth_checked: true,
            current_user,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }
}

// --- Route Catalog Vocabulary ---

/// Visibility
///
/// The guard attached to every catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Reachable by anyone once the auth check has resolved.
    Public,
    /// Any signed-in user, admin or not.
    RequiresAuth,
    /// Signed-in administrators only.
    RequiresAdmin,
    /// Signed-in shoppers only.
    RequiresNonAdmin,
}

impl Visibility {
    /// Whether a route with this guard belongs to the navigable set for `user`.
    pub fn admits(self, user: Option<&User>) -> bool {
        match self {
            Visibility::Public => true,
            Visibility::RequiresAuth => user.is_some(),
            Visibility::RequiresAdmin => user.is_some_and(|u| u.is_admin),
            Visibility::RequiresNonAdmin => user.is_some_and(|u| !u.is_admin),
        }
    }

    pub fn is_guarded(self) -> bool {
        self != Visibility::Public
    }
}

/// View
///
/// One identifier per page the renderer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Signup,
    Login,
    VerifyOtp,
    ForgotPassword,
    ResetPassword,
    ProductDetails,
    Logout,
    AdminDashboard,
    ProductUpdate,
    AddProduct,
    AdminOrders,
    Home,
    Cart,
    Profile,
    Checkout,
    OrderSuccess,
    UserOrders,
    Wishlist,
    NotFound,
}

/// RouteDef
///
/// A single entry of the static route catalog. Patterns use `:name` for path parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDef {
    pub path: &'static str,
    pub view: View,
    pub visibility: Visibility,
}

impl RouteDef {
    pub const fn new(path: &'static str, view: View, visibility: Visibility) -> Self {
        Self {
            path,
            view,
            visibility,
        }
    }
}

/// RouteSummary
///
/// Owned, documented form of a `RouteDef`, returned by `GET /routes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RouteSummary {
    pub path: String,
    pub view: View,
    pub visibility: Visibility,
}

impl From<&RouteDef> for RouteSummary {
    fn from(route: &RouteDef) -> Self {
        Self {
            path: route.path.to_string(),
            view: route.view,
            visibility: route.visibility,
        }
    }
}

// --- Decisions ---

/// RenderTarget
///
/// What to draw: the page, the pattern that matched it and the extracted path parameters.
/// The catch-all NotFound render carries the `*` pattern and no parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RenderTarget {
    pub view: View,
    pub path: String,
    pub params: BTreeMap<String, String>,
}

impl RenderTarget {
    pub fn new(route: &RouteDef, params: BTreeMap<String, String>) -> Self {
        Self {
            view: route.view,
            path: route.path.to_string(),
            params,
        }
    }

    pub fn not_found() -> Self {
        Self {
            view: View::NotFound,
            path: crate::catalog::CATCH_ALL.to_string(),
            params: BTreeMap::new(),
        }
    }
}

/// NavigationDecision
///
/// The only output of the authorizer. Serialized adjacently tagged, e.g.
/// `{"kind":"redirect_to","target":"/login"}` or `{"kind":"pending"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum NavigationDecision {
    /// The auth check has not resolved; render nothing.
    Pending,
    Render(RenderTarget),
    RedirectTo(String),
}

impl NavigationDecision {
    pub fn redirect(path: &str) -> Self {
        NavigationDecision::RedirectTo(path.to_string())
    }

    pub fn not_found() -> Self {
        NavigationDecision::Render(RenderTarget::not_found())
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, NavigationDecision::Pending)
    }

    /// The view to draw, if this is a render.
    pub fn view(&self) -> Option<View> {
        match self {
            NavigationDecision::Render(target) => Some(target.view),
            _ => None,
        }
    }
}
