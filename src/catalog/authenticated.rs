use crate::models::{RouteDef, View, Visibility::RequiresAuth};

/// Authenticated Route Group
///
/// Pages open to any signed-in user, administrator or shopper. Unlike the role-scoped
/// groups these stay registered for anonymous visitors, who are sent to `/login`
/// instead of the catch-all.
pub const ROUTES: &[RouteDef] = &[
    RouteDef::new("/product-details/:id", View::ProductDetails, RequiresAuth),
    RouteDef::new("/logout", View::Logout, RequiresAuth),
];
