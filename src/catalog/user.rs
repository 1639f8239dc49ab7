use crate::models::{RouteDef, View, Visibility::RequiresNonAdmin};

/// Shopper Route Group
///
/// The storefront proper. Only present for signed-in non-admin users.
pub const ROUTES: &[RouteDef] = &[
    RouteDef::new("/home", View::Home, RequiresNonAdmin),
    RouteDef::new("/cart", View::Cart, RequiresNonAdmin),
    RouteDef::new("/profile", View::Profile, RequiresNonAdmin),
    RouteDef::new("/checkout", View::Checkout, RequiresNonAdmin),
    RouteDef::new("/order-success/:id", View::OrderSuccess, RequiresNonAdmin),
    RouteDef::new("/orders", View::UserOrders, RequiresNonAdmin),
    RouteDef::new("/wishlist", View::Wishlist, RequiresNonAdmin),
];
